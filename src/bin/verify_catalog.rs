use anyhow::{bail, Context, Result};
use catalog_seed_lib::db::Database;
use catalog_seed_lib::models::TableCounts;
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
struct Summary {
    path: String,
    tables: Vec<String>,
    counts: TableCounts,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: verify_catalog <db_path>");
    }

    let path = Path::new(&args[1]);
    if !path.is_file() {
        bail!("No database at {}", path.display());
    }

    let db = Database::open(path)?;
    let summary = Summary {
        path: path.display().to_string(),
        tables: db.table_names().context("Could not list tables")?,
        counts: db.table_counts().context("Could not count rows")?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

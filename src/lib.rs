pub mod assets;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod seed;

use assets::{copy_to_targets, CopyOutcome};
use config::BuildConfig;
use db::Database;
use errors::CatalogError;
use log::info;
use models::TableCounts;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub artifact: PathBuf,
    pub counts: TableCounts,
    pub copies: Vec<CopyOutcome>,
}

impl BuildReport {
    pub fn copy_failures(&self) -> usize {
        self.copies.iter().filter(|c| !c.is_ok()).count()
    }
}

/// Recreates the catalog database, seeds it and copies it into the asset folders.
///
/// Schema and seed failures abort the run. Copy failures only show up in the report.
pub fn build_catalog(config: &BuildConfig) -> Result<BuildReport, CatalogError> {
    info!("Creating music app database...");

    let mut db = Database::create(&config.db_path)?;
    let now = chrono::Utc::now().timestamp();
    let counts = seed::seed_sample_data(&mut db, now)?;
    drop(db);

    let artifact = std::fs::canonicalize(&config.db_path).unwrap_or_else(|_| config.db_path.clone());
    info!("Database created successfully: {}", artifact.display());

    let copies = if config.copy_assets {
        copy_to_targets(&artifact, &config.asset_targets)
    } else {
        Vec::new()
    };

    info!("Database creation complete!");
    Ok(BuildReport {
        artifact,
        counts,
        copies,
    })
}

use anyhow::{Context, Result};
use catalog_seed_lib::assets::AssetTarget;
use catalog_seed_lib::build_catalog;
use catalog_seed_lib::config::BuildConfig;
use clap::Parser;
use log::warn;
use std::path::PathBuf;

/// Builds the pre-populated catalog database bundled with the app
#[derive(Parser, Debug)]
#[command(name = "catalog-seed")]
#[command(version)]
struct Args {
    /// Project root the default paths are resolved under
    #[arg(long, default_value = ".", env = "CATALOG_PROJECT_ROOT")]
    project_root: PathBuf,

    /// Where to write the database (defaults to <project-root>/db.sqlite)
    #[arg(long, env = "CATALOG_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Asset folder to copy the database into; replaces the Android/iOS defaults
    #[arg(long = "asset-dir")]
    asset_dirs: Vec<PathBuf>,

    /// Skip copying into asset folders
    #[arg(long)]
    no_copy: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> BuildConfig {
        let mut config = BuildConfig::with_root(&self.project_root);
        if let Some(db_path) = self.db_path {
            config.db_path = db_path;
        }
        if !self.asset_dirs.is_empty() {
            config.asset_targets = self.asset_dirs.into_iter().map(AssetTarget::custom).collect();
        }
        config.copy_assets = !self.no_copy;
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    catalog_seed_lib::logging::init(args.verbose);

    let config = args.into_config();
    let report = build_catalog(&config)
        .with_context(|| format!("Failed to build catalog at {}", config.db_path.display()))?;

    if report.copy_failures() > 0 {
        warn!(
            "{} asset copy(ies) failed; the database is still available at {}",
            report.copy_failures(),
            report.artifact.display()
        );
    }

    println!("{}", report.artifact.display());
    println!(
        "songs={} playlists={} playlist_songs={} liked_songs={}",
        report.counts.songs,
        report.counts.playlists,
        report.counts.playlist_songs,
        report.counts.liked_songs
    );
    Ok(())
}

use crate::errors::CatalogError;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    Android,
    Ios,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetTarget {
    pub platform: Platform,
    pub dir: PathBuf,
}

impl AssetTarget {
    pub fn android(project_root: &Path) -> Self {
        Self {
            platform: Platform::Android,
            dir: project_root.join("android").join("app").join("src").join("main").join("assets"),
        }
    }

    pub fn ios(project_root: &Path) -> Self {
        Self {
            platform: Platform::Ios,
            dir: project_root.join("ios").join("Assets"),
        }
    }

    pub fn custom<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            platform: Platform::Custom,
            dir: dir.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CopyOutcome {
    pub target: AssetTarget,
    pub result: Result<PathBuf, String>,
}

impl CopyOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Copies the artifact into `assets_dir` under its own file name, creating the
/// directory if needed and overwriting an earlier copy.
pub fn copy_to_assets(artifact: &Path, assets_dir: &Path) -> Result<PathBuf, CatalogError> {
    let file_name = artifact.file_name().ok_or_else(|| CatalogError::Copy {
        dest: assets_dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "artifact path has no file name"),
    })?;
    let dest = assets_dir.join(file_name);

    fs::create_dir_all(assets_dir).map_err(|source| CatalogError::Copy {
        dest: assets_dir.to_path_buf(),
        source,
    })?;
    // fs::copy onto the source truncates it before reading.
    if is_same_file(artifact, &dest) {
        return Err(CatalogError::Copy {
            dest,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination is the artifact itself",
            ),
        });
    }
    fs::copy(artifact, &dest).map_err(|source| CatalogError::Copy {
        dest: dest.clone(),
        source,
    })?;

    Ok(dest)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copies the artifact to every target. Failures are logged and recorded,
/// never returned: the artifact itself already exists at this point.
pub fn copy_to_targets(artifact: &Path, targets: &[AssetTarget]) -> Vec<CopyOutcome> {
    targets
        .iter()
        .map(|target| {
            let result = match copy_to_assets(artifact, &target.dir) {
                Ok(dest) => {
                    info!("Database copied to assets folder: {}", dest.display());
                    log_followup(target.platform);
                    Ok(dest)
                }
                Err(e) => {
                    warn!("Could not copy database to {}: {}", target.dir.display(), e);
                    warn!("Copy the database file into the project's assets folder manually.");
                    Err(e.to_string())
                }
            };
            CopyOutcome {
                target: target.clone(),
                result,
            }
        })
        .collect()
}

fn log_followup(platform: Platform) {
    match platform {
        Platform::Android => info!("Android: the database is bundled from the assets folder as-is"),
        Platform::Ios => info!("iOS: add the copied database file to the Xcode project resources"),
        Platform::Custom => {}
    }
}

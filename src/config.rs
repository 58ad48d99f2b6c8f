use crate::assets::AssetTarget;
use std::path::{Path, PathBuf};

/// File name of the artifact, shared by the app bundle.
pub const DB_FILE_NAME: &str = "db.sqlite";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub db_path: PathBuf,
    pub asset_targets: Vec<AssetTarget>,
    pub copy_assets: bool,
}

impl BuildConfig {
    /// Defaults resolved under a React Native style project root.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            db_path: root.join(DB_FILE_NAME),
            asset_targets: vec![AssetTarget::android(root), AssetTarget::ios(root)],
            copy_assets: true,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::with_root("")
    }
}

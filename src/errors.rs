use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The artifact file could not be removed or created.
    #[error("Artifact error at {}: {source}", .path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SQLite refused to open the artifact (locked, unwritable, not a database).
    #[error("Could not open artifact {}: {source}", .path.display())]
    ArtifactOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema creation failed: {0}")]
    Schema(#[source] rusqlite::Error),

    /// A seed row violated a declared constraint. The seed data is fixed,
    /// so this always points at a defect in the dataset.
    #[error("Constraint violation in {table} for {row}: {source}")]
    SchemaConstraint {
        table: &'static str,
        row: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Copy to {} failed: {source}", .dest.display())]
    Copy {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Wraps an insert failure, classifying SQLite constraint violations
    /// separately from other engine errors.
    pub fn from_insert(table: &'static str, row: String, err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => CatalogError::SchemaConstraint {
                table,
                row,
                source: err,
            },
            _ => CatalogError::Database(err),
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, CatalogError::Copy { .. })
    }
}

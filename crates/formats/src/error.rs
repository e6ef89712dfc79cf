use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column {column:?} not found in header")]
    MissingColumn { column: String },
    #[error("invalid column map: {0}")]
    ColumnMap(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}

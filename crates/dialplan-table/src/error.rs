//! Table error types

use dialplan_core::{ConfigurationError, RecordError};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Cannot access {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

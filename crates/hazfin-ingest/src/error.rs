//! Ingestion error types
//!
//! Every variant names the source file (and where possible the line or
//! natural key) so a failed run points straight at the row to fix.

use thiserror::Error;

/// Result type alias for loader operations
pub type IngestResult<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file} line {line}: required field '{column}' is empty")]
    MissingField {
        file: String,
        line: usize,
        column: String,
    },

    #[error("{file} line {line}: invalid value for '{column}': {message}")]
    InvalidValue {
        file: String,
        line: usize,
        column: String,
        message: String,
    },

    #[error("{file}: {entity} '{key}' not found; load parent tables first")]
    UnknownReference {
        file: String,
        entity: String,
        key: String,
    },

    #[error("{file}: not a readable CSV file: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Common(#[from] hazfin_common::HazfinError),
}

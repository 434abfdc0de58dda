//! CLI error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Ingest(#[from] hazfin_ingest::IngestError),

    #[error(transparent)]
    Db(#[from] hazfin_store::DbError),

    #[error(transparent)]
    Common(#[from] hazfin_common::HazfinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The command finished and reported its problem already; exit non-zero
    /// without printing another error line.
    #[error("{0}")]
    Failed(String),
}

//! Error types shared across the hazfin workspace

use thiserror::Error;

/// Result type alias for hazfin operations
pub type Result<T> = std::result::Result<T, HazfinError>;

/// Main error type for cross-crate concerns
#[derive(Error, Debug)]
pub enum HazfinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

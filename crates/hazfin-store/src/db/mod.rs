//! Store handle and initialization

pub mod schema;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Store path or connection settings are invalid
    #[error("Database configuration error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller-supplied argument is out of range
    #[error("{0}")]
    InvalidInput(String),
}

impl DbError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: &str) -> Self {
        Self::NotFound(format!("{} '{}' not found in database", resource_type, identifier))
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Open (or create) the store at the given path and ensure the schema exists.
///
/// The ingestion pipeline is a single sequential writer, so the pool is kept
/// at one connection; SQLite serializes everything behind it.
pub async fn open_store(db_path: &Path) -> DbResult<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DbError::config(format!("Cannot create {}: {}", parent.display(), e)))?;
        }
    }

    // mode=rwc creates the database file on first open
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    init_store(&pool).await?;

    if newly_created {
        info!(path = %db_path.display(), "Initialized new store");
    } else {
        info!(path = %db_path.display(), "Opened existing store");
    }

    Ok(pool)
}

/// Open an in-memory store, used by tests.
///
/// The pool is limited to a single connection: each SQLite `:memory:`
/// connection is its own database, so a second connection would see nothing.
pub async fn open_memory_store() -> DbResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    init_store(&pool).await?;
    Ok(pool)
}

async fn init_store(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;
    schema::create_all_tables(pool).await?;
    Ok(())
}

//! Lineage recording
//!
//! One `metadata_versions` row per source file, upserted by filename and
//! never deleted. Queries attach these fingerprints as provenance so every
//! answer traces back to exact input versions.

use crate::error::IngestResult;
use chrono::Utc;
use sqlx::SqlitePool;

/// Record (or refresh) the lineage entry for one source file
pub async fn record_lineage(
    pool: &SqlitePool,
    source_name: &str,
    sha256: &str,
    rows_loaded: i64,
) -> IngestResult<()> {
    sqlx::query(
        r#"
        INSERT INTO metadata_versions (source_name, sha256, rows_loaded, loaded_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(source_name) DO UPDATE SET
            sha256 = excluded.sha256,
            rows_loaded = excluded.rows_loaded,
            loaded_at = excluded.loaded_at
        "#,
    )
    .bind(source_name)
    .bind(sha256)
    .bind(rows_loaded)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

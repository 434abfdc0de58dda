//! chemicals.csv loader
//!
//! Columns: `name` (required); `cas`, `hazard_flags`, `default_hazard_level`
//! (optional). The upsert key is the CAS registry id; rows without one fall
//! back to the chemical name so re-ingestion stays idempotent. Malformed
//! hazard-flags payloads and out-of-range levels land as-is — they are
//! validation findings, not load failures.

use super::LoadStats;
use crate::error::IngestResult;
use crate::reader::CsvTable;
use hazfin_store::models::Chemical;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["name"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let name = row.required("name")?;
        let cas = row.optional("cas");
        let hazard_flags = row.optional("hazard_flags");
        let hazard_level = row.optional_i64("default_hazard_level")?;

        let existing = match &cas {
            Some(cas) => {
                sqlx::query_as::<_, Chemical>(
                    "SELECT id, name, cas, hazard_flags, default_hazard_level \
                     FROM chemicals WHERE cas = ?1",
                )
                .bind(cas)
                .fetch_optional(pool)
                .await?
            },
            None => {
                sqlx::query_as::<_, Chemical>(
                    "SELECT id, name, cas, hazard_flags, default_hazard_level \
                     FROM chemicals WHERE cas IS NULL AND name = ?1",
                )
                .bind(&name)
                .fetch_optional(pool)
                .await?
            },
        };

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO chemicals (name, cas, hazard_flags, default_hazard_level) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&name)
                .bind(&cas)
                .bind(&hazard_flags)
                .bind(hazard_level)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                let unchanged = current.name == name
                    && current.hazard_flags == hazard_flags
                    && current.default_hazard_level == hazard_level;
                if !unchanged {
                    sqlx::query(
                        "UPDATE chemicals \
                         SET name = ?2, hazard_flags = ?3, default_hazard_level = ?4 \
                         WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(&name)
                    .bind(&hazard_flags)
                    .bind(hazard_level)
                    .execute(pool)
                    .await?;
                    stats.updated += 1;
                }
            },
        }
    }

    debug!(
        file = table.file_name(),
        rows = stats.rows_read,
        inserted = stats.inserted,
        updated = stats.updated,
        "Loaded chemicals"
    );

    Ok(stats)
}

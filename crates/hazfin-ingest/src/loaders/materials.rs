//! materials_map.csv loader
//!
//! Columns: `base_spec` (required); `variant`, `description`, `notes`
//! (optional). The natural key is (base_spec, variant) with a NULL variant
//! distinct from any named one.

use super::LoadStats;
use crate::error::IngestResult;
use crate::reader::CsvTable;
use hazfin_store::models::Material;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["base_spec"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let base_spec = row.required("base_spec")?;
        let variant = row.optional("variant");
        let description = row.optional("description");
        let notes = row.optional("notes");

        let existing = sqlx::query_as::<_, Material>(
            "SELECT id, base_spec, variant, description, notes FROM materials \
             WHERE base_spec = ?1 AND (variant = ?2 OR (variant IS NULL AND ?2 IS NULL))",
        )
        .bind(&base_spec)
        .bind(&variant)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO materials (base_spec, variant, description, notes) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&base_spec)
                .bind(&variant)
                .bind(&description)
                .bind(&notes)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                if current.description != description || current.notes != notes {
                    sqlx::query("UPDATE materials SET description = ?2, notes = ?3 WHERE id = ?1")
                        .bind(current.id)
                        .bind(&description)
                        .bind(&notes)
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
        "Loaded materials"
    );

    Ok(stats)
}

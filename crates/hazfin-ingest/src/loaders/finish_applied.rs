//! finish_applied.csv loader
//!
//! Columns: `code`, `description` (required); `associated_specs`,
//! `source_doc` (optional).

use super::LoadStats;
use crate::error::IngestResult;
use crate::reader::CsvTable;
use hazfin_store::models::FinishApplied;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["code", "description"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let code = row.required("code")?;
        let description = row.required("description")?;
        let associated_specs = row.optional("associated_specs");
        let source_doc = row.optional("source_doc");

        let existing = sqlx::query_as::<_, FinishApplied>(
            "SELECT id, code, description, associated_specs, source_doc \
             FROM finish_applied WHERE code = ?1",
        )
        .bind(&code)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO finish_applied (code, description, associated_specs, source_doc) \
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(&code)
                .bind(&description)
                .bind(&associated_specs)
                .bind(&source_doc)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                let unchanged = current.description == description
                    && current.associated_specs == associated_specs
                    && current.source_doc == source_doc;
                if !unchanged {
                    sqlx::query(
                        "UPDATE finish_applied \
                         SET description = ?2, associated_specs = ?3, source_doc = ?4 \
                         WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(&description)
                    .bind(&associated_specs)
                    .bind(&source_doc)
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
        "Loaded finish_applied"
    );

    Ok(stats)
}

//! substrates.csv loader
//!
//! Columns: `code`, `description` (required); `source_doc` (optional).

use super::LoadStats;
use crate::error::IngestResult;
use crate::reader::CsvTable;
use hazfin_store::models::Substrate;
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
        let source_doc = row.optional("source_doc");

        let existing = sqlx::query_as::<_, Substrate>(
            "SELECT id, code, description, source_doc FROM substrates WHERE code = ?1",
        )
        .bind(&code)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO substrates (code, description, source_doc) VALUES (?1, ?2, ?3)",
                )
                .bind(&code)
                .bind(&description)
                .bind(&source_doc)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                if current.description != description || current.source_doc != source_doc {
                    sqlx::query(
                        "UPDATE substrates SET description = ?2, source_doc = ?3 WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(&description)
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
        "Loaded substrates"
    );

    Ok(stats)
}

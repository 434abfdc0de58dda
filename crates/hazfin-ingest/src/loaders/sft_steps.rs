//! sft_steps.csv loader
//!
//! Columns: `sft_code`, `description` (required); `parent_group`,
//! `associated_specs`, `source_doc`, `last_review`, `notes` (optional).

use super::LoadStats;
use crate::error::IngestResult;
use crate::reader::CsvTable;
use hazfin_store::models::SftStep;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["sft_code", "description"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let sft_code = row.required("sft_code")?;
        let description = row.required("description")?;
        let parent_group = row.optional("parent_group");
        let associated_specs = row.optional("associated_specs");
        let source_doc = row.optional("source_doc");
        let last_review = row.optional("last_review");
        let notes = row.optional("notes");

        let existing = sqlx::query_as::<_, SftStep>(
            "SELECT id, sft_code, parent_group, description, associated_specs, source_doc, \
                    last_review, notes \
             FROM sft_steps WHERE sft_code = ?1",
        )
        .bind(&sft_code)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO sft_steps \
                     (sft_code, parent_group, description, associated_specs, source_doc, \
                      last_review, notes) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .bind(&sft_code)
                .bind(&parent_group)
                .bind(&description)
                .bind(&associated_specs)
                .bind(&source_doc)
                .bind(&last_review)
                .bind(&notes)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                let unchanged = current.parent_group == parent_group
                    && current.description == description
                    && current.associated_specs == associated_specs
                    && current.source_doc == source_doc
                    && current.last_review == last_review
                    && current.notes == notes;
                if !unchanged {
                    sqlx::query(
                        "UPDATE sft_steps \
                         SET parent_group = ?2, description = ?3, associated_specs = ?4, \
                             source_doc = ?5, last_review = ?6, notes = ?7 \
                         WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(&parent_group)
                    .bind(&description)
                    .bind(&associated_specs)
                    .bind(&source_doc)
                    .bind(&last_review)
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
        "Loaded sft_steps"
    );

    Ok(stats)
}

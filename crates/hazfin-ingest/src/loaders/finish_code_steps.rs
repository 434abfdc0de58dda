//! finish_code_steps.csv loader
//!
//! Columns: `finish_code`, `sft_code`, `step_order` (all required). This is
//! the authoritative step-order assignment list; both referenced tables must
//! already be loaded.

use super::{find_finish_code_id, find_sft_id, LoadStats};
use crate::error::{IngestError, IngestResult};
use crate::reader::CsvTable;
use hazfin_store::models::FinishCodeStep;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["finish_code", "sft_code", "step_order"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let finish_code = row.required("finish_code")?;
        let sft_code = row.required("sft_code")?;
        let step_order = row.required_i64("step_order")?;

        let finish_code_id = find_finish_code_id(pool, &finish_code).await?.ok_or_else(|| {
            IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "finish code".to_string(),
                key: finish_code.clone(),
            }
        })?;

        let sft_id = find_sft_id(pool, &sft_code).await?.ok_or_else(|| {
            IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "SFT step".to_string(),
                key: sft_code.clone(),
            }
        })?;

        let existing = sqlx::query_as::<_, FinishCodeStep>(
            "SELECT id, finish_code_id, sft_id, step_order FROM finish_code_steps \
             WHERE finish_code_id = ?1 AND sft_id = ?2",
        )
        .bind(finish_code_id)
        .bind(sft_id)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO finish_code_steps (finish_code_id, sft_id, step_order) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(finish_code_id)
                .bind(sft_id)
                .bind(step_order)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                if current.step_order != step_order {
                    sqlx::query("UPDATE finish_code_steps SET step_order = ?2 WHERE id = ?1")
                        .bind(current.id)
                        .bind(step_order)
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
        "Loaded finish_code_steps"
    );

    Ok(stats)
}

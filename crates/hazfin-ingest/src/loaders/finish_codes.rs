//! finish_codes.csv loader
//!
//! Columns: `finish_code`, `substrate_code`, `finish_applied_code`, `seq_id`
//! (required); `description` (alias `finish_code_description`), `notes`,
//! `associated_specs`, `source_doc` (optional).
//!
//! An optional `sft_steps` column may carry an embedded JSON array of step
//! codes (e.g. `["SFT0001","SFT0002"]`); it is expanded into ordered
//! `finish_code_steps` rows after the finish code itself is upserted.
//! Step codes that do not resolve are skipped with a warning — the embedded
//! arrays are extracted from scanned documents and the standalone
//! finish_code_steps.csv remains the authoritative assignment list.

use super::{find_finish_applied_id, find_substrate_id, LoadStats};
use crate::error::{IngestError, IngestResult};
use crate::reader::CsvTable;
use hazfin_store::models::FinishCode;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, warn};

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(
        csv_path,
        &["finish_code", "substrate_code", "finish_applied_code", "seq_id"],
    )?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    // (finish_code, raw step array) pairs, expanded once all codes exist
    let mut embedded_steps: Vec<(String, String)> = Vec::new();

    for row in table.rows() {
        let code = row.required("finish_code")?;
        let substrate_code = row.required("substrate_code")?;
        let finish_applied_code = row.required("finish_applied_code")?;
        let seq_id = row.required_i64("seq_id")?;

        let substrate_id = find_substrate_id(pool, &substrate_code).await?.ok_or_else(|| {
            IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "substrate".to_string(),
                key: substrate_code.clone(),
            }
        })?;

        let finish_applied_id =
            find_finish_applied_id(pool, &finish_applied_code).await?.ok_or_else(|| {
                IngestError::UnknownReference {
                    file: table.file_name().to_string(),
                    entity: "finish_applied".to_string(),
                    key: finish_applied_code.clone(),
                }
            })?;

        let description = row
            .optional("description")
            .or_else(|| row.optional("finish_code_description"));
        let notes = row.optional("notes");
        let associated_specs = row.optional("associated_specs");
        let source_doc = row.optional("source_doc");

        let existing = sqlx::query_as::<_, FinishCode>(
            "SELECT id, code, substrate_id, finish_applied_id, seq_id, description, notes, \
                    associated_specs, source_doc \
             FROM finish_codes WHERE code = ?1",
        )
        .bind(&code)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO finish_codes \
                     (code, substrate_id, finish_applied_id, seq_id, description, notes, \
                      associated_specs, source_doc) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .bind(&code)
                .bind(substrate_id)
                .bind(finish_applied_id)
                .bind(seq_id)
                .bind(&description)
                .bind(&notes)
                .bind(&associated_specs)
                .bind(&source_doc)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                let unchanged = current.substrate_id == substrate_id
                    && current.finish_applied_id == finish_applied_id
                    && current.seq_id == seq_id
                    && current.description == description
                    && current.notes == notes
                    && current.associated_specs == associated_specs
                    && current.source_doc == source_doc;
                if !unchanged {
                    sqlx::query(
                        "UPDATE finish_codes \
                         SET substrate_id = ?2, finish_applied_id = ?3, seq_id = ?4, \
                             description = ?5, notes = ?6, associated_specs = ?7, \
                             source_doc = ?8 \
                         WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(substrate_id)
                    .bind(finish_applied_id)
                    .bind(seq_id)
                    .bind(&description)
                    .bind(&notes)
                    .bind(&associated_specs)
                    .bind(&source_doc)
                    .execute(pool)
                    .await?;
                    stats.updated += 1;
                }
            },
        }

        if let Some(raw) = row.optional("sft_steps") {
            if raw != "[]" {
                embedded_steps.push((code.clone(), raw));
            }
        }
    }

    expand_embedded_steps(pool, &embedded_steps).await?;

    debug!(
        file = table.file_name(),
        rows = stats.rows_read,
        inserted = stats.inserted,
        updated = stats.updated,
        "Loaded finish_codes"
    );

    Ok(stats)
}

/// Expand embedded step arrays into ordered finish_code_steps rows
async fn expand_embedded_steps(
    pool: &SqlitePool,
    embedded: &[(String, String)],
) -> IngestResult<()> {
    for (finish_code, raw) in embedded {
        let step_codes = parse_step_array(raw);
        if step_codes.is_empty() {
            continue;
        }

        let Some(finish_code_id) =
            sqlx::query_scalar::<_, i64>("SELECT id FROM finish_codes WHERE code = ?1")
                .bind(finish_code)
                .fetch_optional(pool)
                .await?
        else {
            continue;
        };

        for (index, sft_code) in step_codes.iter().enumerate() {
            let step_order = (index + 1) as i64;

            let Some(sft_id) =
                sqlx::query_scalar::<_, i64>("SELECT id FROM sft_steps WHERE sft_code = ?1")
                    .bind(sft_code)
                    .fetch_optional(pool)
                    .await?
            else {
                warn!(
                    finish_code = finish_code.as_str(),
                    sft_code = sft_code.as_str(),
                    "Embedded step code not found, skipping"
                );
                continue;
            };

            sqlx::query(
                "INSERT INTO finish_code_steps (finish_code_id, sft_id, step_order) \
                 VALUES (?1, ?2, ?3) \
                 ON CONFLICT(finish_code_id, sft_id) DO UPDATE SET \
                     step_order = excluded.step_order",
            )
            .bind(finish_code_id)
            .bind(sft_id)
            .bind(step_order)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

/// Parse an embedded step array; JSON first, bracketed comma list as fallback
fn parse_step_array(raw: &str) -> Vec<String> {
    if let Ok(codes) = serde_json::from_str::<Vec<String>>(raw) {
        return codes
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }

    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|c| c.trim().trim_matches(|ch| ch == '"' || ch == '\'').to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

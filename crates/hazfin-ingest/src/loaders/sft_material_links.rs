//! sft_material_links.csv loader
//!
//! Columns: `sft_code`, `base_spec` (required); `variant`, `note`
//! (optional). Many-to-many between steps and materials.

use super::{find_material_id, find_sft_id, material_key, LoadStats};
use crate::error::{IngestError, IngestResult};
use crate::reader::CsvTable;
use hazfin_store::models::SftMaterialLink;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["sft_code", "base_spec"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let sft_code = row.required("sft_code")?;
        let base_spec = row.required("base_spec")?;
        let variant = row.optional("variant");
        let note = row.optional("note");

        let sft_id = find_sft_id(pool, &sft_code).await?.ok_or_else(|| {
            IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "SFT step".to_string(),
                key: sft_code.clone(),
            }
        })?;

        let material_id = find_material_id(pool, &base_spec, variant.as_deref())
            .await?
            .ok_or_else(|| IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "material".to_string(),
                key: material_key(&base_spec, variant.as_deref()),
            })?;

        let existing = sqlx::query_as::<_, SftMaterialLink>(
            "SELECT id, sft_id, material_id, note FROM sft_material_links \
             WHERE sft_id = ?1 AND material_id = ?2",
        )
        .bind(sft_id)
        .bind(material_id)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO sft_material_links (sft_id, material_id, note) \
                     VALUES (?1, ?2, ?3)",
                )
                .bind(sft_id)
                .bind(material_id)
                .bind(&note)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                if current.note != note {
                    sqlx::query("UPDATE sft_material_links SET note = ?2 WHERE id = ?1")
                        .bind(current.id)
                        .bind(&note)
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
        "Loaded sft_material_links"
    );

    Ok(stats)
}

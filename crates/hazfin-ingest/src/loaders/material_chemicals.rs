//! material_chemicals.csv loader
//!
//! Columns: `base_spec`, `cas` (required); `variant`, `pct_wt_low`,
//! `pct_wt_high`, `notes` (optional). Gives a material's composition as
//! weight-percent ranges; out-of-range percentages land as-is for
//! validation to flag.

use super::{find_chemical_id_by_cas, find_material_id, material_key, LoadStats};
use crate::error::{IngestError, IngestResult};
use crate::reader::CsvTable;
use hazfin_store::models::MaterialChemical;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

pub async fn load(csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    let table = CsvTable::read(csv_path, &["base_spec", "cas"])?;
    let mut stats = LoadStats {
        rows_read: table.row_count(),
        ..Default::default()
    };

    for row in table.rows() {
        let base_spec = row.required("base_spec")?;
        let cas = row.required("cas")?;
        let variant = row.optional("variant");
        let pct_wt_low = row.optional_f64("pct_wt_low")?;
        let pct_wt_high = row.optional_f64("pct_wt_high")?;
        let notes = row.optional("notes");

        let material_id = find_material_id(pool, &base_spec, variant.as_deref())
            .await?
            .ok_or_else(|| IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "material".to_string(),
                key: material_key(&base_spec, variant.as_deref()),
            })?;

        let chemical_id = find_chemical_id_by_cas(pool, &cas).await?.ok_or_else(|| {
            IngestError::UnknownReference {
                file: table.file_name().to_string(),
                entity: "chemical with CAS".to_string(),
                key: cas.clone(),
            }
        })?;

        let existing = sqlx::query_as::<_, MaterialChemical>(
            "SELECT id, material_id, chemical_id, pct_wt_low, pct_wt_high, notes \
             FROM material_chemicals \
             WHERE material_id = ?1 AND chemical_id = ?2",
        )
        .bind(material_id)
        .bind(chemical_id)
        .fetch_optional(pool)
        .await?;

        match existing {
            None => {
                sqlx::query(
                    "INSERT INTO material_chemicals \
                     (material_id, chemical_id, pct_wt_low, pct_wt_high, notes) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .bind(material_id)
                .bind(chemical_id)
                .bind(pct_wt_low)
                .bind(pct_wt_high)
                .bind(&notes)
                .execute(pool)
                .await?;
                stats.inserted += 1;
            },
            Some(current) => {
                let unchanged = current.pct_wt_low == pct_wt_low
                    && current.pct_wt_high == pct_wt_high
                    && current.notes == notes;
                if !unchanged {
                    sqlx::query(
                        "UPDATE material_chemicals \
                         SET pct_wt_low = ?2, pct_wt_high = ?3, notes = ?4 \
                         WHERE id = ?1",
                    )
                    .bind(current.id)
                    .bind(pct_wt_low)
                    .bind(pct_wt_high)
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
        "Loaded material_chemicals"
    );

    Ok(stats)
}

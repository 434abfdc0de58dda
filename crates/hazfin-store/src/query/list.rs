//! Flat listings over the store

use crate::db::{DbError, DbResult};
use hazfin_common::types::HazardFlags;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// One row of the finish-code catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishCodeSummary {
    pub code: String,
    pub description: Option<String>,
    pub substrate: String,
    pub finish_applied: String,
    pub seq_id: i64,
    pub source_doc: Option<String>,
}

/// One row of a hazard-filtered chemical listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalSummary {
    pub name: String,
    pub cas: Option<String>,
    pub hazard_flags: Option<HazardFlags>,
    pub default_hazard_level: Option<i64>,
}

/// List every finish code with its substrate and finish descriptions
pub async fn list_finish_codes(pool: &SqlitePool) -> DbResult<Vec<FinishCodeSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT
            fc.code, fc.description, fc.seq_id, fc.source_doc,
            s.description AS substrate,
            fa.description AS finish_applied
        FROM finish_codes fc
        JOIN substrates s ON fc.substrate_id = s.id
        JOIN finish_applied fa ON fc.finish_applied_id = fa.id
        ORDER BY fc.code
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| FinishCodeSummary {
            code: row.get("code"),
            description: row.get("description"),
            substrate: row.get("substrate"),
            finish_applied: row.get("finish_applied"),
            seq_id: row.get("seq_id"),
            source_doc: row.get("source_doc"),
        })
        .collect())
}

/// List chemicals at or above a hazard level, most hazardous first
pub async fn chemicals_by_min_level(
    pool: &SqlitePool,
    min_level: i64,
) -> DbResult<Vec<ChemicalSummary>> {
    if !(1..=5).contains(&min_level) {
        return Err(DbError::InvalidInput(format!(
            "min_level must be 1-5, got: {}",
            min_level
        )));
    }

    let rows = sqlx::query(
        r#"
        SELECT name, cas, hazard_flags, default_hazard_level
        FROM chemicals
        WHERE default_hazard_level >= ?1
        ORDER BY default_hazard_level DESC, name ASC
        "#,
    )
    .bind(min_level)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let raw_flags: Option<String> = row.get("hazard_flags");
            ChemicalSummary {
                name: row.get("name"),
                cas: row.get("cas"),
                hazard_flags: raw_flags.as_deref().and_then(|raw| HazardFlags::parse(raw).ok()),
                default_hazard_level: row.get("default_hazard_level"),
            }
        })
        .collect())
}

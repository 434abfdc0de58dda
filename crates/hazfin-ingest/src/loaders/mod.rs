//! Table loaders, one module per source CSV
//!
//! Every loader follows the same contract: parse the file through
//! [`crate::reader::CsvTable`], resolve parent surrogate ids by natural key,
//! then upsert row by row — insert when the key is new, update when any
//! field differs, touch nothing when the incoming row is identical. The
//! returned [`LoadStats`] therefore reports zero inserted and zero updated
//! rows when an unchanged file is re-ingested.

pub mod chemicals;
pub mod finish_applied;
pub mod finish_code_steps;
pub mod finish_codes;
pub mod material_chemicals;
pub mod materials;
pub mod sft_material_links;
pub mod sft_steps;
pub mod substrates;

use crate::error::IngestResult;
use sqlx::SqlitePool;

pub use hazfin_common::types::LoadStats;

// Natural-key lookups shared by the child-table loaders. A `None` means the
// parent has not been loaded; callers turn that into an UnknownReference
// naming the offending file and key.

pub(crate) async fn find_substrate_id(pool: &SqlitePool, code: &str) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM substrates WHERE code = ?1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

pub(crate) async fn find_finish_applied_id(
    pool: &SqlitePool,
    code: &str,
) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM finish_applied WHERE code = ?1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

pub(crate) async fn find_finish_code_id(
    pool: &SqlitePool,
    code: &str,
) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM finish_codes WHERE code = ?1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

pub(crate) async fn find_sft_id(pool: &SqlitePool, sft_code: &str) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM sft_steps WHERE sft_code = ?1")
        .bind(sft_code)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

pub(crate) async fn find_material_id(
    pool: &SqlitePool,
    base_spec: &str,
    variant: Option<&str>,
) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM materials \
         WHERE base_spec = ?1 AND (variant = ?2 OR (variant IS NULL AND ?2 IS NULL))",
    )
    .bind(base_spec)
    .bind(variant)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

pub(crate) async fn find_chemical_id_by_cas(
    pool: &SqlitePool,
    cas: &str,
) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM chemicals WHERE cas = ?1")
        .bind(cas)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

/// Display form of a material key for error messages
pub(crate) fn material_key(base_spec: &str, variant: Option<&str>) -> String {
    match variant {
        Some(v) => format!("{} {}", base_spec, v),
        None => base_spec.to_string(),
    }
}

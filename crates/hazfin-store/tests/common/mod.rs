//! Shared row-insertion helpers for store tests
//!
//! Tests insert fixture rows directly so they do not depend on the CSV
//! loaders; ids are fixed to keep assertions readable.
#![allow(dead_code)]

use sqlx::SqlitePool;

pub async fn insert_substrate(pool: &SqlitePool, id: i64, code: &str, description: &str) {
    sqlx::query("INSERT INTO substrates (id, code, description) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(code)
        .bind(description)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_finish_applied(pool: &SqlitePool, id: i64, code: &str, description: &str) {
    sqlx::query("INSERT INTO finish_applied (id, code, description) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(code)
        .bind(description)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_finish_code(
    pool: &SqlitePool,
    id: i64,
    code: &str,
    substrate_id: i64,
    finish_applied_id: i64,
    seq_id: i64,
) {
    sqlx::query(
        "INSERT INTO finish_codes \
         (id, code, substrate_id, finish_applied_id, seq_id, description) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(code)
    .bind(substrate_id)
    .bind(finish_applied_id)
    .bind(seq_id)
    .bind(format!("{code} test finish"))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_sft_step(pool: &SqlitePool, id: i64, sft_code: &str, description: &str) {
    sqlx::query("INSERT INTO sft_steps (id, sft_code, description) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(sft_code)
        .bind(description)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_step_assignment(
    pool: &SqlitePool,
    finish_code_id: i64,
    sft_id: i64,
    step_order: i64,
) {
    sqlx::query(
        "INSERT INTO finish_code_steps (finish_code_id, sft_id, step_order) VALUES (?1, ?2, ?3)",
    )
    .bind(finish_code_id)
    .bind(sft_id)
    .bind(step_order)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_material(pool: &SqlitePool, id: i64, base_spec: &str, variant: Option<&str>) {
    sqlx::query("INSERT INTO materials (id, base_spec, variant) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(base_spec)
        .bind(variant)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_material_link(pool: &SqlitePool, sft_id: i64, material_id: i64) {
    sqlx::query("INSERT INTO sft_material_links (sft_id, material_id) VALUES (?1, ?2)")
        .bind(sft_id)
        .bind(material_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_chemical(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    cas: Option<&str>,
    hazard_flags: Option<&str>,
    level: Option<i64>,
) {
    sqlx::query(
        "INSERT INTO chemicals (id, name, cas, hazard_flags, default_hazard_level) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(name)
    .bind(cas)
    .bind(hazard_flags)
    .bind(level)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_composition(
    pool: &SqlitePool,
    material_id: i64,
    chemical_id: i64,
    low: Option<f64>,
    high: Option<f64>,
) {
    sqlx::query(
        "INSERT INTO material_chemicals (material_id, chemical_id, pct_wt_low, pct_wt_high) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(material_id)
    .bind(chemical_id)
    .bind(low)
    .bind(high)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_lineage(pool: &SqlitePool, source_name: &str, sha256: &str, loaded_at: &str) {
    sqlx::query(
        "INSERT INTO metadata_versions (source_name, sha256, rows_loaded, loaded_at) \
         VALUES (?1, ?2, 1, ?3)",
    )
    .bind(source_name)
    .bind(sha256)
    .bind(loaded_at)
    .execute(pool)
    .await
    .unwrap();
}

/// Disable foreign-key enforcement so tests can plant orphan rows
pub async fn disable_foreign_keys(pool: &SqlitePool) {
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(pool)
        .await
        .unwrap();
}

//! Table creation
//!
//! One `CREATE TABLE IF NOT EXISTS` per table, executed in dependency order.
//! Every entity carries an integer surrogate id plus its durable natural key
//! under a UNIQUE constraint; the natural key is what loaders upsert by.
//!
//! Format and range rules (CAS pattern, hazard level, weight percentages)
//! are deliberately not CHECK constraints: bad values must land so the
//! validators can report them against the source row.

use sqlx::SqlitePool;

/// Create all tables, parents before children
pub async fn create_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_substrates_table(pool).await?;
    create_finish_applied_table(pool).await?;
    create_finish_codes_table(pool).await?;
    create_sft_steps_table(pool).await?;
    create_finish_code_steps_table(pool).await?;
    create_materials_table(pool).await?;
    create_chemicals_table(pool).await?;
    create_sft_material_links_table(pool).await?;
    create_material_chemicals_table(pool).await?;
    create_metadata_versions_table(pool).await?;
    Ok(())
}

async fn create_substrates_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS substrates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            source_doc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_finish_applied_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS finish_applied (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            associated_specs TEXT,
            source_doc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_finish_codes_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS finish_codes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            substrate_id INTEGER NOT NULL REFERENCES substrates(id),
            finish_applied_id INTEGER NOT NULL REFERENCES finish_applied(id),
            seq_id INTEGER NOT NULL,
            description TEXT,
            notes TEXT,
            associated_specs TEXT,
            source_doc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sft_steps_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sft_steps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sft_code TEXT NOT NULL UNIQUE,
            parent_group TEXT,
            description TEXT NOT NULL,
            associated_specs TEXT,
            source_doc TEXT,
            last_review TEXT,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// step_order is intentionally not UNIQUE here: order collisions are a
// validation finding, and a re-ingested file that swaps two orders must
// upsert cleanly row by row.
async fn create_finish_code_steps_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS finish_code_steps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            finish_code_id INTEGER NOT NULL REFERENCES finish_codes(id),
            sft_id INTEGER NOT NULL REFERENCES sft_steps(id),
            step_order INTEGER NOT NULL,
            UNIQUE(finish_code_id, sft_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_materials_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS materials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            base_spec TEXT NOT NULL,
            variant TEXT,
            description TEXT,
            notes TEXT,
            UNIQUE(base_spec, variant)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_chemicals_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chemicals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            cas TEXT UNIQUE,
            hazard_flags TEXT,
            default_hazard_level INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sft_material_links_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sft_material_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sft_id INTEGER NOT NULL REFERENCES sft_steps(id),
            material_id INTEGER NOT NULL REFERENCES materials(id),
            note TEXT,
            UNIQUE(sft_id, material_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_material_chemicals_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS material_chemicals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            material_id INTEGER NOT NULL REFERENCES materials(id),
            chemical_id INTEGER NOT NULL REFERENCES chemicals(id),
            pct_wt_low REAL,
            pct_wt_high REAL,
            notes TEXT,
            UNIQUE(material_id, chemical_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_metadata_versions_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS metadata_versions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_name TEXT NOT NULL UNIQUE,
            sha256 TEXT NOT NULL,
            rows_loaded INTEGER NOT NULL,
            loaded_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

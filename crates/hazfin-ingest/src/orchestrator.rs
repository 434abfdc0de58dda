//! Ingestion orchestrator
//!
//! Runs all nine loaders in foreign-key dependency order (parents first) and
//! assembles the structured run report. Any failure aborts the remainder of
//! the run: a stopped pipeline beats silently partial data.

use crate::error::{IngestError, IngestResult};
use crate::{lineage, loaders};
use chrono::Utc;
use hazfin_common::checksum::compute_file_checksum;
use hazfin_common::types::{FileReport, IngestFailure, IngestReport, IngestStatus, LoadStats};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, info};

/// Source files in load order; children follow every table they reference
pub const LOAD_SEQUENCE: &[&str] = &[
    "substrates.csv",
    "finish_applied.csv",
    "sft_steps.csv",
    "finish_codes.csv",
    "finish_code_steps.csv",
    "materials_map.csv",
    "chemicals.csv",
    "sft_material_links.csv",
    "material_chemicals.csv",
];

/// Ingest every source file from `input_dir` into the store.
///
/// Returns `Err` only when the input directory itself is missing; per-file
/// failures abort the run and are reported inside the returned
/// [`IngestReport`] instead.
#[tracing::instrument(skip(pool))]
pub async fn ingest_all(input_dir: &Path, pool: &SqlitePool) -> IngestResult<IngestReport> {
    if !input_dir.is_dir() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory not found: {}", input_dir.display()),
        )));
    }

    let mut files = BTreeMap::new();

    for &file_name in LOAD_SEQUENCE {
        let csv_path = input_dir.join(file_name);

        match load_one(&csv_path, file_name, pool).await {
            Ok(report) => {
                info!(
                    file = file_name,
                    rows = report.rows,
                    inserted = report.inserted,
                    updated = report.updated,
                    "Loaded file"
                );
                files.insert(file_name.to_string(), report);
            },
            Err(e) => {
                error!(file = file_name, error = %e, "Ingestion aborted");
                return Ok(IngestReport {
                    status: IngestStatus::Failed,
                    files,
                    error: Some(IngestFailure {
                        file: file_name.to_string(),
                        message: e.to_string(),
                    }),
                    finished_at: Utc::now(),
                });
            },
        }
    }

    info!(files = files.len(), "Ingestion complete");

    Ok(IngestReport {
        status: IngestStatus::Success,
        files,
        error: None,
        finished_at: Utc::now(),
    })
}

async fn load_one(csv_path: &Path, file_name: &str, pool: &SqlitePool) -> IngestResult<FileReport> {
    if !csv_path.is_file() {
        return Err(IngestError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", csv_path.display()),
        )));
    }

    // Fingerprint before parsing so the lineage row always describes the
    // exact bytes the loader saw
    let sha256 = compute_file_checksum(csv_path)?;
    let stats = dispatch(file_name, csv_path, pool).await?;
    lineage::record_lineage(pool, file_name, &sha256, stats.rows_read as i64).await?;

    Ok(FileReport {
        file: file_name.to_string(),
        sha256,
        rows: stats.rows_read,
        inserted: stats.inserted,
        updated: stats.updated,
    })
}

async fn dispatch(file_name: &str, csv_path: &Path, pool: &SqlitePool) -> IngestResult<LoadStats> {
    match file_name {
        "substrates.csv" => loaders::substrates::load(csv_path, pool).await,
        "finish_applied.csv" => loaders::finish_applied::load(csv_path, pool).await,
        "sft_steps.csv" => loaders::sft_steps::load(csv_path, pool).await,
        "finish_codes.csv" => loaders::finish_codes::load(csv_path, pool).await,
        "finish_code_steps.csv" => loaders::finish_code_steps::load(csv_path, pool).await,
        "materials_map.csv" => loaders::materials::load(csv_path, pool).await,
        "chemicals.csv" => loaders::chemicals::load(csv_path, pool).await,
        "sft_material_links.csv" => loaders::sft_material_links::load(csv_path, pool).await,
        "material_chemicals.csv" => loaders::material_chemicals::load(csv_path, pool).await,
        other => unreachable!("no loader registered for {other}"),
    }
}

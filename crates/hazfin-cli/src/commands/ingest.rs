//! `hazfin ingest` - load the CSV set, then validate

use crate::{config, CliError};
use hazfin_common::types::{IngestStatus, ValidationStatus};
use hazfin_ingest::ingest_all;
use hazfin_store::{open_store, validate};
use serde::Serialize;
use std::path::PathBuf;

/// Combined run output written as the JSON report
#[derive(Serialize)]
struct RunReport {
    ingestion: hazfin_common::types::IngestReport,
    validation: Option<hazfin_common::types::ValidationReport>,
}

pub async fn run(
    input_dir: Option<PathBuf>,
    db: Option<PathBuf>,
    report: Option<PathBuf>,
) -> crate::Result<()> {
    let input_dir = config::input_dir(input_dir);
    let db_path = config::db_path(db);
    let report_path = config::report_path(report);

    println!("Ingesting CSV files from: {}", input_dir.display());
    println!("Target store: {}", db_path.display());

    let pool = open_store(&db_path).await?;
    let ingestion = ingest_all(&input_dir, &pool).await?;

    // Validation still runs after a failed ingest so whatever landed can be
    // inspected, but its findings are only advisory at that point
    let validation = validate::validate_all(&pool).await?;

    for file_report in ingestion.files.values() {
        println!(
            "  {}: {} rows ({} inserted, {} updated) sha256={}",
            file_report.file,
            file_report.rows,
            file_report.inserted,
            file_report.updated,
            &file_report.sha256[..16],
        );
    }

    if let Some(failure) = &ingestion.error {
        println!("Ingestion FAILED at {}: {}", failure.file, failure.message);
    } else {
        println!("Ingestion complete: {} files loaded", ingestion.files.len());
    }

    print_validation_summary(&validation);

    let run_report = RunReport {
        ingestion,
        validation: Some(validation),
    };

    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&report_path, serde_json::to_string_pretty(&run_report)?)?;
    println!("Report written to: {}", report_path.display());

    if run_report.ingestion.status == IngestStatus::Failed {
        return Err(CliError::Failed("ingestion failed".to_string()));
    }
    if let Some(validation) = &run_report.validation {
        if validation.status == ValidationStatus::Errors {
            return Err(CliError::Failed("validation reported errors".to_string()));
        }
    }

    Ok(())
}

fn print_validation_summary(report: &hazfin_common::types::ValidationReport) {
    println!("{}", report.summary);
    for finding in &report.errors {
        println!("  ERROR [{}.{}] {}: {}", finding.table, finding.column, finding.issue, finding.details);
    }
    for finding in &report.warnings {
        println!("  WARNING [{}.{}] {}: {}", finding.table, finding.column, finding.issue, finding.details);
    }
}

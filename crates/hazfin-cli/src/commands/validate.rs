//! `hazfin validate` - run validation checks against the store

use crate::{config, CliError};
use hazfin_common::types::ValidationStatus;
use hazfin_store::{open_store, validate};
use std::path::PathBuf;

pub async fn run(db: Option<PathBuf>) -> crate::Result<()> {
    let db_path = config::db_path(db);

    if !db_path.exists() {
        eprintln!("Error: store not found: {}", db_path.display());
        eprintln!("Run 'hazfin ingest' first to load data");
        return Err(CliError::Failed("store not found".to_string()));
    }

    let pool = open_store(&db_path).await?;
    let report = validate::validate_all(&pool).await?;

    println!("Errors: {}", report.error_count);
    println!("Warnings: {}", report.warning_count);

    for finding in &report.errors {
        println!(
            "  ERROR [{}.{}] {}: {}",
            finding.table, finding.column, finding.issue, finding.details
        );
    }
    for finding in &report.warnings {
        println!(
            "  WARNING [{}.{}] {}: {}",
            finding.table, finding.column, finding.issue, finding.details
        );
    }

    println!("{}", report.summary);

    if report.status == ValidationStatus::Errors {
        return Err(CliError::Failed("validation failed".to_string()));
    }

    Ok(())
}

//! Post-ingestion validation
//!
//! Read-only checks over the populated store. Findings carry the table,
//! column, issue tag, and the natural key of the offending row so a human
//! can fix the source CSV; nothing is auto-repaired.
//!
//! Severity policy: referential, completeness, format, and step-ordering
//! violations are errors; a material whose chemical weight percentages sum
//! above 100% is a warning.

mod completeness;
mod formats;
mod ordering;
mod referential;

use crate::db::DbResult;
use hazfin_common::types::ValidationReport;
use sqlx::SqlitePool;
use tracing::info;

/// Run every validator and assemble the combined report
#[tracing::instrument(skip(pool))]
pub async fn validate_all(pool: &SqlitePool) -> DbResult<ValidationReport> {
    let mut findings = Vec::new();

    findings.extend(referential::check(pool).await?);
    findings.extend(completeness::check(pool).await?);
    findings.extend(formats::check(pool).await?);
    findings.extend(ordering::check(pool).await?);

    let report = ValidationReport::from_findings(findings);
    info!(
        errors = report.error_count,
        warnings = report.warning_count,
        "Validation finished"
    );

    Ok(report)
}

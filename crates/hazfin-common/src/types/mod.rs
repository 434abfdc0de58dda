//! Common types used across hazfin
//!
//! Report structures produced by ingestion and validation, plus the
//! hazard-flags payload shared by the loader, validator, and query engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Hazard Flags
// ============================================================================

/// Structured hazard classification carried by a chemical.
///
/// Stored in the database as a JSON text column with this fixed shape;
/// validation rejects payloads that do not parse into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardFlags {
    /// Hazard statement codes (e.g., "H317", "H350")
    #[serde(default)]
    pub codes: Vec<String>,

    /// Hazard categories (e.g., "carcinogen", "sensitizer")
    #[serde(default)]
    pub categories: Vec<String>,

    /// GHS signal word ("Danger" or "Warning")
    #[serde(default)]
    pub signal_word: Option<String>,
}

impl HazardFlags {
    /// Parse a raw JSON payload into the expected shape
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

// ============================================================================
// Validation Report
// ============================================================================

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation violation with enough context to locate the source row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    /// Table the violation was found in
    pub table: String,
    /// Column (or columns) involved
    pub column: String,
    /// Short machine-readable issue tag (e.g., "orphan_fk", "invalid_cas")
    pub issue: String,
    /// Human-readable description naming the offending natural key
    pub details: String,
}

impl Finding {
    pub fn error(table: &str, column: &str, issue: &str, details: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            table: table.to_string(),
            column: column.to_string(),
            issue: issue.to_string(),
            details: details.into(),
        }
    }

    pub fn warning(table: &str, column: &str, issue: &str, details: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            table: table.to_string(),
            column: column.to_string(),
            issue: issue.to_string(),
            details: details.into(),
        }
    }
}

/// Overall validation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Warnings,
    Errors,
}

/// Result of running all validators against a populated store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub summary: String,
}

impl ValidationReport {
    /// Assemble a report from raw findings, splitting by severity
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.severity == Severity::Error);

        let error_count = errors.len();
        let warning_count = warnings.len();

        let (status, summary) = if error_count > 0 {
            (
                ValidationStatus::Errors,
                format!(
                    "Validation FAILED: {} error(s), {} warning(s)",
                    error_count, warning_count
                ),
            )
        } else if warning_count > 0 {
            (
                ValidationStatus::Warnings,
                format!("Validation passed with {} warning(s)", warning_count),
            )
        } else {
            (
                ValidationStatus::Pass,
                "Validation passed: no errors or warnings".to_string(),
            )
        };

        Self {
            status,
            error_count,
            warning_count,
            errors,
            warnings,
            summary,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == ValidationStatus::Pass
    }
}

// ============================================================================
// Ingestion Report
// ============================================================================

/// Per-table row bookkeeping returned by each loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Rows read from the CSV file
    pub rows_read: usize,
    /// Rows newly inserted
    pub inserted: usize,
    /// Existing rows whose fields changed
    pub updated: usize,
}

impl LoadStats {
    pub fn merge(&mut self, other: LoadStats) {
        self.rows_read += other.rows_read;
        self.inserted += other.inserted;
        self.updated += other.updated;
    }
}

/// Outcome of loading one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub sha256: String,
    pub rows: usize,
    pub inserted: usize,
    pub updated: usize,
}

/// Overall ingestion outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    Failed,
}

/// Structured report for a whole ingestion run.
///
/// A failure in any file aborts the run; `files` then holds only the files
/// that completed before the fatal error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub status: IngestStatus,
    /// Per-file results in load order, keyed by source filename
    pub files: BTreeMap<String, FileReport>,
    /// Fatal error that aborted the run, if any
    pub error: Option<IngestFailure>,
    pub finished_at: DateTime<Utc>,
}

/// The file and cause that aborted an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestFailure {
    pub file: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_flags_full_shape() {
        let raw = r#"{"codes": ["H317"], "categories": ["sensitizer"], "signal_word": "Warning"}"#;
        let flags = HazardFlags::parse(raw).unwrap();
        assert_eq!(flags.codes, vec!["H317"]);
        assert_eq!(flags.signal_word.as_deref(), Some("Warning"));
    }

    #[test]
    fn test_hazard_flags_partial_shape() {
        let flags = HazardFlags::parse(r#"{"codes": ["H350"]}"#).unwrap();
        assert!(flags.categories.is_empty());
        assert!(flags.signal_word.is_none());
    }

    #[test]
    fn test_hazard_flags_rejects_non_object() {
        assert!(HazardFlags::parse("[1, 2, 3]").is_err());
        assert!(HazardFlags::parse("not json").is_err());
    }

    #[test]
    fn test_report_status_from_findings() {
        let report = ValidationReport::from_findings(vec![]);
        assert_eq!(report.status, ValidationStatus::Pass);
        assert!(report.is_clean());

        let report = ValidationReport::from_findings(vec![Finding::warning(
            "material_chemicals",
            "pct_wt_high",
            "exceeds_100_percent",
            "total 120%",
        )]);
        assert_eq!(report.status, ValidationStatus::Warnings);

        let report = ValidationReport::from_findings(vec![
            Finding::error("chemicals", "cas", "invalid_cas_format", "bad"),
            Finding::warning("material_chemicals", "pct_wt_high", "exceeds_100_percent", "x"),
        ]);
        assert_eq!(report.status, ValidationStatus::Errors);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.warning_count, 1);
    }
}

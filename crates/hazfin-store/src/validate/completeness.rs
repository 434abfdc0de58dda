//! Required-field completeness checks
//!
//! NULL and blank values are both treated as missing: the loaders store
//! empty CSV cells as NULL, but out-of-band edits can leave empty strings.

use crate::db::DbResult;
use hazfin_common::types::Finding;
use sqlx::{Row, SqlitePool};

/// Required (table, column) pairs
const REQUIRED_FIELDS: &[(&str, &str)] = &[
    ("substrates", "code"),
    ("substrates", "description"),
    ("finish_applied", "code"),
    ("finish_applied", "description"),
    ("finish_codes", "code"),
    ("finish_codes", "seq_id"),
    ("finish_codes", "description"),
    ("sft_steps", "sft_code"),
    ("sft_steps", "description"),
    ("finish_code_steps", "step_order"),
    ("materials", "base_spec"),
    ("chemicals", "name"),
    ("chemicals", "cas"),
    ("metadata_versions", "source_name"),
    ("metadata_versions", "sha256"),
    ("metadata_versions", "rows_loaded"),
];

pub(super) async fn check(pool: &SqlitePool) -> DbResult<Vec<Finding>> {
    let mut findings = Vec::new();

    for (table, column) in REQUIRED_FIELDS {
        let sql = format!(
            "SELECT COUNT(*) AS missing FROM {table} \
             WHERE {column} IS NULL OR TRIM(CAST({column} AS TEXT)) = ''",
        );

        let row = sqlx::query(&sql).fetch_one(pool).await?;
        let missing: i64 = row.get("missing");

        if missing > 0 {
            findings.push(Finding::error(
                table,
                column,
                "missing_value",
                format!("{} row(s) have NULL or blank {}", missing, column),
            ));
        }
    }

    Ok(findings)
}

//! Step-order checks
//!
//! Per finish code, step orders must be unique and form a contiguous 1..N
//! sequence. Uniqueness lives here rather than in the schema so that
//! re-ingesting a file that reorders steps stays an idempotent upsert.

use crate::db::DbResult;
use hazfin_common::types::Finding;
use sqlx::{Row, SqlitePool};

pub(super) async fn check(pool: &SqlitePool) -> DbResult<Vec<Finding>> {
    let rows = sqlx::query(
        r#"
        SELECT fc.code, fcs.step_order
        FROM finish_code_steps fcs
        JOIN finish_codes fc ON fcs.finish_code_id = fc.id
        ORDER BY fc.code, fcs.step_order
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut findings = Vec::new();
    let mut current: Option<(String, Vec<i64>)> = None;

    for row in rows {
        let code: String = row.get("code");
        let order: i64 = row.get("step_order");

        match &mut current {
            Some((c, orders)) if *c == code => orders.push(order),
            _ => {
                if let Some((c, orders)) = current.take() {
                    check_sequence(&c, &orders, &mut findings);
                }
                current = Some((code, vec![order]));
            },
        }
    }

    if let Some((c, orders)) = current {
        check_sequence(&c, &orders, &mut findings);
    }

    Ok(findings)
}

/// `orders` arrives sorted ascending for one finish code
fn check_sequence(code: &str, orders: &[i64], findings: &mut Vec<Finding>) {
    for pair in orders.windows(2) {
        if pair[0] == pair[1] {
            findings.push(Finding::error(
                "finish_code_steps",
                "step_order",
                "duplicate_step_order",
                format!("Finish code '{}' has step_order {} more than once", code, pair[0]),
            ));
            return;
        }
    }

    let expected: Vec<i64> = (1..=orders.len() as i64).collect();
    if orders != expected.as_slice() {
        findings.push(Finding::error(
            "finish_code_steps",
            "step_order",
            "non_contiguous_order",
            format!(
                "Finish code '{}' step orders are not contiguous from 1 (found: {:?})",
                code, orders
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_sequence_is_clean() {
        let mut findings = Vec::new();
        check_sequence("BP27", &[1, 2, 3], &mut findings);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_gap_is_flagged() {
        let mut findings = Vec::new();
        check_sequence("BP27", &[1, 3], &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].issue, "non_contiguous_order");
    }

    #[test]
    fn test_duplicate_is_flagged() {
        let mut findings = Vec::new();
        check_sequence("BP27", &[1, 2, 2], &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].issue, "duplicate_step_order");
    }

    #[test]
    fn test_zero_based_sequence_is_flagged() {
        let mut findings = Vec::new();
        check_sequence("BP27", &[0, 1], &mut findings);
        assert_eq!(findings.len(), 1);
    }
}

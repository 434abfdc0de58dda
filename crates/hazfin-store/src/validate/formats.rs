//! Format and cross-field checks
//!
//! CAS registry patterns, the hazard-flags payload shape, numeric ranges,
//! and the finish-code composition rule.

use crate::db::DbResult;
use hazfin_common::types::{Finding, HazardFlags};
use regex::Regex;
use sqlx::{Row, SqlitePool};
use std::sync::OnceLock;

/// CAS registry format: 4-7 digits, 2 digits, check digit
fn cas_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4,7}-\d{2}-\d$").expect("valid CAS regex"))
}

pub(super) async fn check(pool: &SqlitePool) -> DbResult<Vec<Finding>> {
    let mut findings = Vec::new();

    check_chemicals(pool, &mut findings).await?;
    check_compositions(pool, &mut findings).await?;
    check_weight_sums(pool, &mut findings).await?;
    check_finish_code_composition(pool, &mut findings).await?;

    Ok(findings)
}

async fn check_chemicals(pool: &SqlitePool, findings: &mut Vec<Finding>) -> DbResult<()> {
    let rows = sqlx::query(
        "SELECT id, name, cas, hazard_flags, default_hazard_level FROM chemicals ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    for row in rows {
        let id: i64 = row.get("id");
        let name: String = row.get("name");
        let cas: Option<String> = row.get("cas");
        let hazard_flags: Option<String> = row.get("hazard_flags");
        let level: Option<i64> = row.get("default_hazard_level");

        if let Some(cas) = &cas {
            if !cas_pattern().is_match(cas) {
                findings.push(Finding::error(
                    "chemicals",
                    "cas",
                    "invalid_cas_format",
                    format!("Chemical '{}' (id={}) has invalid CAS: '{}'", name, id, cas),
                ));
            }
        }

        if let Some(raw) = &hazard_flags {
            if let Err(e) = HazardFlags::parse(raw) {
                findings.push(Finding::error(
                    "chemicals",
                    "hazard_flags",
                    "invalid_hazard_flags",
                    format!(
                        "Chemical '{}' (id={}) has malformed hazard_flags payload: {}",
                        name, id, e
                    ),
                ));
            }
        }

        if let Some(level) = level {
            if !(1..=5).contains(&level) {
                findings.push(Finding::error(
                    "chemicals",
                    "default_hazard_level",
                    "out_of_range",
                    format!(
                        "Chemical '{}' (id={}) has invalid hazard level: {} (must be 1-5)",
                        name, id, level
                    ),
                ));
            }
        }
    }

    Ok(())
}

async fn check_compositions(pool: &SqlitePool, findings: &mut Vec<Finding>) -> DbResult<()> {
    let rows = sqlx::query(
        r#"
        SELECT m.base_spec, m.variant, c.name AS chemical_name,
               mc.pct_wt_low, mc.pct_wt_high
        FROM material_chemicals mc
        JOIN materials m ON mc.material_id = m.id
        JOIN chemicals c ON mc.chemical_id = c.id
        ORDER BY mc.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    for row in rows {
        let base_spec: String = row.get("base_spec");
        let variant: Option<String> = row.get("variant");
        let chemical: String = row.get("chemical_name");
        let low: Option<f64> = row.get("pct_wt_low");
        let high: Option<f64> = row.get("pct_wt_high");

        let material = match &variant {
            Some(v) => format!("{} {}", base_spec, v),
            None => base_spec.clone(),
        };

        if let (Some(low), Some(high)) = (low, high) {
            if low > high {
                findings.push(Finding::error(
                    "material_chemicals",
                    "pct_wt_low, pct_wt_high",
                    "invalid_range",
                    format!(
                        "Material '{}' - Chemical '{}': pct_wt_low ({}) > pct_wt_high ({})",
                        material, chemical, low, high
                    ),
                ));
            }
        }

        for (column, value) in [("pct_wt_low", low), ("pct_wt_high", high)] {
            if let Some(value) = value {
                if !(0.0..=100.0).contains(&value) {
                    findings.push(Finding::error(
                        "material_chemicals",
                        column,
                        "out_of_range",
                        format!(
                            "Material '{}' - Chemical '{}': {} ({}) outside [0, 100]",
                            material, chemical, column, value
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

// Soft limit: overlapping ranges legitimately push the nominal maximum past
// 100%, so this stays a warning rather than an error.
async fn check_weight_sums(pool: &SqlitePool, findings: &mut Vec<Finding>) -> DbResult<()> {
    let rows = sqlx::query(
        r#"
        SELECT m.base_spec, m.variant, SUM(mc.pct_wt_high) AS total_max
        FROM materials m
        JOIN material_chemicals mc ON m.id = mc.material_id
        WHERE mc.pct_wt_high IS NOT NULL
        GROUP BY m.id, m.base_spec, m.variant
        HAVING total_max > 100
        ORDER BY m.base_spec, m.variant
        "#,
    )
    .fetch_all(pool)
    .await?;

    for row in rows {
        let base_spec: String = row.get("base_spec");
        let variant: Option<String> = row.get("variant");
        let total: f64 = row.get("total_max");

        let material = match &variant {
            Some(v) => format!("{} {}", base_spec, v),
            None => base_spec,
        };

        findings.push(Finding::warning(
            "material_chemicals",
            "pct_wt_high",
            "exceeds_100_percent",
            format!("Material '{}' has total max weight {:.1}% (>100%)", material, total),
        ));
    }

    Ok(())
}

async fn check_finish_code_composition(
    pool: &SqlitePool,
    findings: &mut Vec<Finding>,
) -> DbResult<()> {
    let rows = sqlx::query(
        r#"
        SELECT fc.code, fc.seq_id, s.code AS substrate_code, fa.code AS finish_applied_code
        FROM finish_codes fc
        JOIN substrates s ON fc.substrate_id = s.id
        JOIN finish_applied fa ON fc.finish_applied_id = fa.id
        ORDER BY fc.code
        "#,
    )
    .fetch_all(pool)
    .await?;

    for row in rows {
        let code: String = row.get("code");
        let seq_id: i64 = row.get("seq_id");
        let substrate: String = row.get("substrate_code");
        let finish: String = row.get("finish_applied_code");

        // Sequence numbers appear both zero-padded (BP07) and plain (BP7)
        let padded = format!("{}{}{:02}", substrate, finish, seq_id);
        let plain = format!("{}{}{}", substrate, finish, seq_id);

        if code != padded && code != plain {
            findings.push(Finding::error(
                "finish_codes",
                "code",
                "code_mismatch",
                format!(
                    "Finish code '{}' does not match its components (expected '{}')",
                    code, padded
                ),
            ));
        }
    }

    Ok(())
}

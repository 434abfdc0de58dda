//! Referential integrity checks
//!
//! Foreign keys are enforced eagerly at load time, so orphans normally
//! cannot be created through the loaders; these probes catch rows introduced
//! by out-of-band edits to the database file.

use crate::db::DbResult;
use hazfin_common::types::Finding;
use sqlx::{Row, SqlitePool};

/// One foreign-key relationship to probe
struct FkCheck {
    child_table: &'static str,
    child_col: &'static str,
    parent_table: &'static str,
}

const FK_CHECKS: &[FkCheck] = &[
    FkCheck {
        child_table: "finish_codes",
        child_col: "substrate_id",
        parent_table: "substrates",
    },
    FkCheck {
        child_table: "finish_codes",
        child_col: "finish_applied_id",
        parent_table: "finish_applied",
    },
    FkCheck {
        child_table: "finish_code_steps",
        child_col: "finish_code_id",
        parent_table: "finish_codes",
    },
    FkCheck {
        child_table: "finish_code_steps",
        child_col: "sft_id",
        parent_table: "sft_steps",
    },
    FkCheck {
        child_table: "sft_material_links",
        child_col: "sft_id",
        parent_table: "sft_steps",
    },
    FkCheck {
        child_table: "sft_material_links",
        child_col: "material_id",
        parent_table: "materials",
    },
    FkCheck {
        child_table: "material_chemicals",
        child_col: "material_id",
        parent_table: "materials",
    },
    FkCheck {
        child_table: "material_chemicals",
        child_col: "chemical_id",
        parent_table: "chemicals",
    },
];

pub(super) async fn check(pool: &SqlitePool) -> DbResult<Vec<Finding>> {
    let mut findings = Vec::new();

    for fk in FK_CHECKS {
        // Table and column names come from the constant list above, never
        // from input, so string assembly is safe here.
        let sql = format!(
            "SELECT c.id AS child_id \
             FROM {child} c LEFT JOIN {parent} p ON c.{col} = p.id \
             WHERE c.{col} IS NOT NULL AND p.id IS NULL \
             ORDER BY c.id",
            child = fk.child_table,
            col = fk.child_col,
            parent = fk.parent_table,
        );

        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        if rows.is_empty() {
            continue;
        }

        let ids: Vec<String> = rows
            .iter()
            .take(5)
            .map(|r| r.get::<i64, _>("child_id").to_string())
            .collect();

        findings.push(Finding::error(
            fk.child_table,
            fk.child_col,
            "orphan_fk",
            format!(
                "{} row(s) reference non-existent {}.id values (row ids: {})",
                rows.len(),
                fk.parent_table,
                ids.join(", ")
            ),
        ));
    }

    Ok(findings)
}

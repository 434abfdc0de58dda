//! Finish-code tree assembly
//!
//! Reconstructs the substrate → finish → steps → materials → chemicals
//! hierarchy for one finish code, with provenance tying the answer back to
//! the exact input file versions that populated the store.

use crate::db::DbResult;
use hazfin_common::types::HazardFlags;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;
use tracing::debug;

/// Result of a tree lookup: an absent code is a normal outcome, not an error
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeLookup {
    Found(Box<FinishCodeTree>),
    NotFound {
        error: String,
        finish_code: String,
        /// First few valid codes, to help correct a typo
        available_codes: Vec<String>,
    },
}

impl TreeLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, TreeLookup::Found(_))
    }
}

/// Complete hierarchy for one finish code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishCodeTree {
    pub finish_code: String,
    pub parsed: ParsedCode,
    /// Specs linked directly to the finish code, bypassing the step list
    pub direct_specs: Vec<String>,
    /// Specs inherited from the finish-applied type
    pub finish_applied_specs: Vec<String>,
    pub steps: Vec<StepNode>,
    pub provenance: Provenance,
}

/// The components a finish code decomposes into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCode {
    pub substrate: CodeDescription,
    pub finish_applied: CodeDescription,
    pub seq_id: i64,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub source_doc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeDescription {
    pub code: String,
    pub description: String,
}

/// One process step with its linked materials, in step order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepNode {
    pub sft_code: String,
    pub step_order: i64,
    pub parent_group: Option<String>,
    pub description: String,
    pub associated_specs: Option<String>,
    pub source_doc: Option<String>,
    pub last_review: Option<String>,
    pub notes: Option<String>,
    pub materials: Vec<MaterialNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialNode {
    pub base_spec: String,
    pub variant: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub link_note: Option<String>,
    pub chemicals: Vec<ChemicalNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalNode {
    pub name: String,
    pub cas: Option<String>,
    pub pct_wt_low: Option<f64>,
    pub pct_wt_high: Option<f64>,
    /// Parsed payload; `None` when absent or malformed (validation reports
    /// malformed payloads separately)
    pub hazard_flags: Option<HazardFlags>,
    pub default_hazard_level: Option<i64>,
    pub composition_notes: Option<String>,
}

/// Which source file versions every part of the answer came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    /// Source filename → SHA-256 fingerprint
    pub csv_shas: BTreeMap<String, String>,
    /// Most recent load timestamp across all source files (RFC 3339)
    pub loaded_at: Option<String>,
}

/// Look up a finish code and assemble its full tree
#[tracing::instrument(skip(pool))]
pub async fn get_finish_code_tree(pool: &SqlitePool, finish_code: &str) -> DbResult<TreeLookup> {
    let header = sqlx::query(
        r#"
        SELECT
            fc.id, fc.code, fc.seq_id, fc.description, fc.notes, fc.source_doc,
            fc.associated_specs,
            s.code AS substrate_code, s.description AS substrate_description,
            fa.code AS finish_applied_code, fa.description AS finish_applied_description,
            fa.associated_specs AS finish_applied_specs
        FROM finish_codes fc
        JOIN substrates s ON fc.substrate_id = s.id
        JOIN finish_applied fa ON fc.finish_applied_id = fa.id
        WHERE fc.code = ?1
        "#,
    )
    .bind(finish_code)
    .fetch_optional(pool)
    .await?;

    let Some(header) = header else {
        debug!(code = finish_code, "Finish code not found");
        let available_codes =
            sqlx::query_scalar::<_, String>("SELECT code FROM finish_codes ORDER BY code LIMIT 10")
                .fetch_all(pool)
                .await?;
        return Ok(TreeLookup::NotFound {
            error: "Finish code not found".to_string(),
            finish_code: finish_code.to_string(),
            available_codes,
        });
    };

    let finish_code_id: i64 = header.get("id");

    let parsed = ParsedCode {
        substrate: CodeDescription {
            code: header.get("substrate_code"),
            description: header.get("substrate_description"),
        },
        finish_applied: CodeDescription {
            code: header.get("finish_applied_code"),
            description: header.get("finish_applied_description"),
        },
        seq_id: header.get("seq_id"),
        description: header.get("description"),
        notes: header.get("notes"),
        source_doc: header.get("source_doc"),
    };

    let direct_specs = split_specs(header.get::<Option<String>, _>("associated_specs"));
    let finish_applied_specs = split_specs(header.get::<Option<String>, _>("finish_applied_specs"));

    let steps = load_steps(pool, finish_code_id).await?;
    let provenance = load_provenance(pool).await?;

    Ok(TreeLookup::Found(Box::new(FinishCodeTree {
        finish_code: finish_code.to_string(),
        parsed,
        direct_specs,
        finish_applied_specs,
        steps,
        provenance,
    })))
}

async fn load_steps(pool: &SqlitePool, finish_code_id: i64) -> DbResult<Vec<StepNode>> {
    let step_rows = sqlx::query(
        r#"
        SELECT
            sft.id AS sft_id, sft.sft_code, sft.parent_group, sft.description,
            sft.associated_specs, sft.source_doc, sft.last_review, sft.notes,
            fcs.step_order
        FROM finish_code_steps fcs
        JOIN sft_steps sft ON fcs.sft_id = sft.id
        WHERE fcs.finish_code_id = ?1
        ORDER BY fcs.step_order
        "#,
    )
    .bind(finish_code_id)
    .fetch_all(pool)
    .await?;

    let mut steps = Vec::with_capacity(step_rows.len());
    for row in step_rows {
        let sft_id: i64 = row.get("sft_id");
        let materials = load_materials(pool, sft_id).await?;

        steps.push(StepNode {
            sft_code: row.get("sft_code"),
            step_order: row.get("step_order"),
            parent_group: row.get("parent_group"),
            description: row.get("description"),
            associated_specs: row.get("associated_specs"),
            source_doc: row.get("source_doc"),
            last_review: row.get("last_review"),
            notes: row.get("notes"),
            materials,
        });
    }

    Ok(steps)
}

async fn load_materials(pool: &SqlitePool, sft_id: i64) -> DbResult<Vec<MaterialNode>> {
    let material_rows = sqlx::query(
        r#"
        SELECT
            m.id AS material_id, m.base_spec, m.variant, m.description, m.notes,
            sml.note AS link_note
        FROM sft_material_links sml
        JOIN materials m ON sml.material_id = m.id
        WHERE sml.sft_id = ?1
        ORDER BY m.base_spec, m.variant
        "#,
    )
    .bind(sft_id)
    .fetch_all(pool)
    .await?;

    let mut materials = Vec::with_capacity(material_rows.len());
    for row in material_rows {
        let material_id: i64 = row.get("material_id");
        let chemicals = load_chemicals(pool, material_id).await?;

        materials.push(MaterialNode {
            base_spec: row.get("base_spec"),
            variant: row.get("variant"),
            description: row.get("description"),
            notes: row.get("notes"),
            link_note: row.get("link_note"),
            chemicals,
        });
    }

    Ok(materials)
}

async fn load_chemicals(pool: &SqlitePool, material_id: i64) -> DbResult<Vec<ChemicalNode>> {
    // Most hazardous first; NULL levels sort last under DESC in SQLite
    let rows = sqlx::query(
        r#"
        SELECT
            c.name, c.cas, c.hazard_flags, c.default_hazard_level,
            mc.pct_wt_low, mc.pct_wt_high, mc.notes AS composition_notes
        FROM material_chemicals mc
        JOIN chemicals c ON mc.chemical_id = c.id
        WHERE mc.material_id = ?1
        ORDER BY c.default_hazard_level DESC, c.name ASC
        "#,
    )
    .bind(material_id)
    .fetch_all(pool)
    .await?;

    let chemicals = rows
        .into_iter()
        .map(|row| {
            let raw_flags: Option<String> = row.get("hazard_flags");
            ChemicalNode {
                name: row.get("name"),
                cas: row.get("cas"),
                pct_wt_low: row.get("pct_wt_low"),
                pct_wt_high: row.get("pct_wt_high"),
                hazard_flags: raw_flags.as_deref().and_then(|raw| HazardFlags::parse(raw).ok()),
                default_hazard_level: row.get("default_hazard_level"),
                composition_notes: row.get("composition_notes"),
            }
        })
        .collect();

    Ok(chemicals)
}

async fn load_provenance(pool: &SqlitePool) -> DbResult<Provenance> {
    let rows = sqlx::query("SELECT source_name, sha256, loaded_at FROM metadata_versions")
        .fetch_all(pool)
        .await?;

    let mut csv_shas = BTreeMap::new();
    let mut loaded_at: Option<String> = None;

    for row in rows {
        let source_name: String = row.get("source_name");
        let sha256: String = row.get("sha256");
        let ts: String = row.get("loaded_at");

        csv_shas.insert(source_name, sha256);
        if loaded_at.as_deref().is_none_or(|latest| ts.as_str() > latest) {
            loaded_at = Some(ts);
        }
    }

    Ok(Provenance { csv_shas, loaded_at })
}

fn split_specs(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

//! Row models for the store tables

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A base material a finish is applied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Substrate {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub source_doc: Option<String>,
}

/// A finish type (plating, coating, anodize, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FinishApplied {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub associated_specs: Option<String>,
    pub source_doc: Option<String>,
}

/// A substrate + finish + sequence combination owning an ordered step list.
///
/// `code` is the composite natural key and must equal the concatenation of
/// the substrate code, the finish-applied code, and the sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FinishCode {
    pub id: i64,
    pub code: String,
    pub substrate_id: i64,
    pub finish_applied_id: i64,
    pub seq_id: i64,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub associated_specs: Option<String>,
    pub source_doc: Option<String>,
}

/// A reusable manufacturing process step, referenced by many finish codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SftStep {
    pub id: i64,
    pub sft_code: String,
    pub parent_group: Option<String>,
    pub description: String,
    pub associated_specs: Option<String>,
    pub source_doc: Option<String>,
    pub last_review: Option<String>,
    pub notes: Option<String>,
}

/// Join row assigning a step its 1-based order within a finish code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FinishCodeStep {
    pub id: i64,
    pub finish_code_id: i64,
    pub sft_id: i64,
    pub step_order: i64,
}

/// A material specification, optionally variant-qualified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Material {
    pub id: i64,
    pub base_spec: String,
    pub variant: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Join row linking a step to a material it uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SftMaterialLink {
    pub id: i64,
    pub sft_id: i64,
    pub material_id: i64,
    pub note: Option<String>,
}

/// A substance with a CAS registry id and hazard classification.
///
/// `hazard_flags` holds the raw JSON payload as loaded; validation checks it
/// against the expected shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Chemical {
    pub id: i64,
    pub name: String,
    pub cas: Option<String>,
    pub hazard_flags: Option<String>,
    pub default_hazard_level: Option<i64>,
}

/// Join row giving a material's chemical composition as a weight-percent range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MaterialChemical {
    pub id: i64,
    pub material_id: i64,
    pub chemical_id: i64,
    pub pct_wt_low: Option<f64>,
    pub pct_wt_high: Option<f64>,
    pub notes: Option<String>,
}

/// Lineage ledger row: one per ingested source file, upserted by filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MetadataVersion {
    pub id: i64,
    pub source_name: String,
    pub sha256: String,
    pub rows_loaded: i64,
    pub loaded_at: String,
}

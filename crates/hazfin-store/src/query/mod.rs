//! Read-only query engine
//!
//! Hierarchical finish-code lookups and flat listings. Every function takes
//! the store pool and never mutates it.

mod list;
mod tree;

pub use list::{chemicals_by_min_level, list_finish_codes, ChemicalSummary, FinishCodeSummary};
pub use tree::{
    get_finish_code_tree, ChemicalNode, CodeDescription, FinishCodeTree, MaterialNode, ParsedCode,
    Provenance, StepNode, TreeLookup,
};

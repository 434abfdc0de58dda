//! Hazfin Common Library
//!
//! Shared types, utilities, and error handling for the hazfin workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all hazfin workspace members:
//!
//! - **Error Handling**: the [`HazfinError`] type and [`Result`] alias
//! - **Checksums**: SHA-256 file fingerprints for lineage tracking
//! - **Logging**: tracing subscriber setup shared by every binary
//! - **Types**: report and domain types exchanged between crates

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{HazfinError, Result};

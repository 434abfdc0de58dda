//! Hazfin Ingest
//!
//! CSV loaders for the hazfin store: one loader per source file, an
//! orchestrator running them in foreign-key dependency order, and lineage
//! recording keyed by source filename.
//!
//! Loading is deterministic and idempotent: every loader upserts by the
//! entity's natural key, so re-ingesting an unchanged file reports zero
//! inserted and zero updated rows.
//!
//! # Example
//!
//! ```no_run
//! use hazfin_ingest::ingest_all;
//! use hazfin_store::open_store;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = open_store(Path::new("data/hazfin.sqlite")).await?;
//!     let report = ingest_all(Path::new("data/inputs"), &pool).await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod lineage;
pub mod loaders;
pub mod orchestrator;
pub mod reader;

pub use error::{IngestError, IngestResult};
pub use orchestrator::{ingest_all, LOAD_SEQUENCE};

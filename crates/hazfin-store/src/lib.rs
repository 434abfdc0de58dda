//! Hazfin Store
//!
//! The SQLite relational store behind the hazfin data engine: schema
//! creation, row models, post-ingestion validators, and the hierarchical
//! query engine.
//!
//! The store handle is an explicit [`sqlx::SqlitePool`] passed to every
//! component call; there is no process-wide singleton. Writers (the loaders
//! in `hazfin-ingest`) run strictly sequentially; everything in this crate's
//! `validate` and `query` modules is read-only.

pub mod db;
pub mod models;
pub mod query;
pub mod validate;

pub use db::{open_memory_store, open_store, DbError, DbResult};

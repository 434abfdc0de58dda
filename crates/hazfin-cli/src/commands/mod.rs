//! Subcommand implementations

pub mod chemicals;
pub mod ingest;
pub mod list;
pub mod show;
pub mod validate;

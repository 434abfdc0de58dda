//! `hazfin list-codes` - list every finish code in the store

use crate::{config, CliError};
use hazfin_store::open_store;
use hazfin_store::query::list_finish_codes;
use std::path::PathBuf;

pub async fn run(db: Option<PathBuf>) -> crate::Result<()> {
    let db_path = config::db_path(db);

    if !db_path.exists() {
        eprintln!("Error: store not found: {}", db_path.display());
        return Err(CliError::Failed("store not found".to_string()));
    }

    let pool = open_store(&db_path).await?;
    let codes = list_finish_codes(&pool).await?;

    if codes.is_empty() {
        println!("No finish codes found; run 'hazfin ingest' to load data");
        return Ok(());
    }

    println!("Finish codes ({} total):", codes.len());
    for summary in &codes {
        println!(
            "  {}  [{} / {} / seq {}]  {}",
            summary.code,
            summary.substrate,
            summary.finish_applied,
            summary.seq_id,
            summary.description.as_deref().unwrap_or(""),
        );
    }

    Ok(())
}

//! `hazfin chemicals` - list chemicals at or above a hazard level

use crate::{config, CliError};
use hazfin_store::open_store;
use hazfin_store::query::chemicals_by_min_level;
use std::path::PathBuf;

pub async fn run(min_level: i64, db: Option<PathBuf>) -> crate::Result<()> {
    let db_path = config::db_path(db);

    if !db_path.exists() {
        eprintln!("Error: store not found: {}", db_path.display());
        return Err(CliError::Failed("store not found".to_string()));
    }

    let pool = open_store(&db_path).await?;
    let chemicals = chemicals_by_min_level(&pool, min_level).await?;

    println!("Chemicals at hazard level >= {}: {}", min_level, chemicals.len());
    for chemical in &chemicals {
        println!(
            "  [{}] {}  CAS {}",
            chemical
                .default_hazard_level
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            chemical.name,
            chemical.cas.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

//! `hazfin show` - print one finish code's full hierarchy as JSON

use crate::{config, CliError};
use hazfin_store::query::{get_finish_code_tree, TreeLookup};
use hazfin_store::open_store;
use std::path::PathBuf;

pub async fn run(
    finish_code: &str,
    db: Option<PathBuf>,
    output: Option<PathBuf>,
    compact: bool,
) -> crate::Result<()> {
    let db_path = config::db_path(db);

    if !db_path.exists() {
        eprintln!("Error: store not found: {}", db_path.display());
        eprintln!("Run 'hazfin ingest' first to load data");
        return Err(CliError::Failed("store not found".to_string()));
    }

    let pool = open_store(&db_path).await?;
    let lookup = get_finish_code_tree(&pool, finish_code).await?;

    let json = if compact {
        serde_json::to_string(&lookup)?
    } else {
        serde_json::to_string_pretty(&lookup)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &json)?;
            println!("Output written to: {}", path.display());
        },
        None => println!("{}", json),
    }

    if !lookup.is_found() {
        return Err(CliError::Failed(format!("finish code '{}' not found", finish_code)));
    }

    Ok(())
}

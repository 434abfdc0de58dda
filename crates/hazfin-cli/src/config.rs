//! Default paths and environment overrides

use std::path::PathBuf;

/// Default SQLite store location
pub const DEFAULT_DB_PATH: &str = "data/hazfin.sqlite";

/// Default directory for the source CSV files
pub const DEFAULT_INPUT_DIR: &str = "data/inputs";

/// Default ingestion report location
pub const DEFAULT_REPORT_PATH: &str = "data/outputs/ingest_report.json";

/// Resolve the store path: flag, then `HAZFIN_DB`, then default
pub fn db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("HAZFIN_DB").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Resolve the input directory: flag, then `HAZFIN_INPUT_DIR`, then default
pub fn input_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("HAZFIN_INPUT_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR))
}

/// Resolve the report path: flag, then default
pub fn report_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH))
}

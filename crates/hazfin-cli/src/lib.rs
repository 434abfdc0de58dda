//! Hazfin CLI
//!
//! Thin command-line front end over the four core contracts: ingest,
//! validate, show, and the flat listings. All logic lives in
//! `hazfin-ingest` and `hazfin-store`; this crate parses arguments, wires
//! defaults, and formats output.

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hazfin")]
#[command(author, version, about = "Hazardous surface-finish data engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug-level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest CSV files into the store, then validate
    Ingest {
        /// Directory containing the nine source CSV files
        #[arg(short, long, env = "HAZFIN_INPUT_DIR")]
        input_dir: Option<PathBuf>,

        /// Path to the SQLite store
        #[arg(short, long, env = "HAZFIN_DB")]
        db: Option<PathBuf>,

        /// Write the JSON ingestion report here
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Run validation checks against the populated store
    Validate {
        /// Path to the SQLite store
        #[arg(short, long, env = "HAZFIN_DB")]
        db: Option<PathBuf>,
    },

    /// Print the full hierarchy for one finish code as JSON
    Show {
        /// Finish code to query (e.g., BP27)
        finish_code: String,

        /// Path to the SQLite store
        #[arg(short, long, env = "HAZFIN_DB")]
        db: Option<PathBuf>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compact JSON output (no pretty-printing)
        #[arg(long)]
        compact: bool,
    },

    /// List every finish code in the store
    ListCodes {
        /// Path to the SQLite store
        #[arg(short, long, env = "HAZFIN_DB")]
        db: Option<PathBuf>,
    },

    /// List chemicals at or above a hazard level
    Chemicals {
        /// Minimum hazard level (1-5)
        #[arg(short, long, default_value_t = 1)]
        min_level: i64,

        /// Path to the SQLite store
        #[arg(short, long, env = "HAZFIN_DB")]
        db: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_parses_positional_code() {
        let cli = Cli::try_parse_from(["hazfin", "show", "BP27", "--compact"]).unwrap();
        match cli.command {
            Commands::Show {
                finish_code,
                compact,
                ..
            } => {
                assert_eq!(finish_code, "BP27");
                assert!(compact);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_prefers_explicit_flag() {
        let flag = PathBuf::from("custom/store.sqlite");
        assert_eq!(config::db_path(Some(flag.clone())), flag);
        assert_eq!(
            config::report_path(None),
            PathBuf::from(config::DEFAULT_REPORT_PATH)
        );
    }
}

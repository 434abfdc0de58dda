//! Hazfin CLI - main entry point

use clap::Parser;
use hazfin_cli::{commands, Cli, CliError, Commands};
use hazfin_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::with_level(LogLevel::Debug)
    } else {
        LogConfig::from_env().unwrap_or_default()
    };

    // The CLI should keep working even when logging cannot initialize
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(cli).await {
        match e {
            // The command already printed its own diagnostics
            CliError::Failed(_) => {},
            e => {
                error!(error = %e, "Command failed");
                eprintln!("Error: {}", e);
            },
        }
        process::exit(1);
    }
}

async fn execute_command(cli: Cli) -> hazfin_cli::Result<()> {
    match cli.command {
        Commands::Ingest {
            input_dir,
            db,
            report,
        } => commands::ingest::run(input_dir, db, report).await,

        Commands::Validate { db } => commands::validate::run(db).await,

        Commands::Show {
            finish_code,
            db,
            output,
            compact,
        } => commands::show::run(&finish_code, db, output, compact).await,

        Commands::ListCodes { db } => commands::list::run(db).await,

        Commands::Chemicals { min_level, db } => commands::chemicals::run(min_level, db).await,
    }
}

//! Command line entry point for the yearly expense importer.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use expense_importer::{Config, import_file};

/// Load a yearly expenditure file into the expense database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The year to import, e.g. 2024. Reads `expenditures_<year>` from the
    /// data directory.
    year: u16,

    /// File path to the SQLite database. Defaults to $EXPENSE_IMPORTER_DB,
    /// then "expenses.db".
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Directory containing the input files. Defaults to
    /// $EXPENSE_IMPORTER_DATA_DIR, then the working directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    setup_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // Usage errors exit with status 1, not clap's default 2.
            let _ = error.print();

            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = Config::from_env(args.db_path, args.data_dir);

    match import_file(&config, args.year) {
        Ok(summary) => {
            tracing::info!(
                "Imported {} expense rows for {} ({} skipped, {} corrected, {} categories)",
                summary.inserted,
                args.year,
                summary.skipped,
                summary.corrected,
                summary.categories
            );

            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error}");

            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

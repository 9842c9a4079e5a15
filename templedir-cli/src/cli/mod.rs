//! Command-line interface definitions

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "templedir-cli",
    version,
    about = "Bulk-import and review tool for the US temple directory"
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and validate a spreadsheet; no network calls
    Check {
        /// Spreadsheet to check (.xlsx or .xls)
        file: PathBuf,
    },
    /// Review a spreadsheet interactively: edit, filter, export, import
    Review {
        /// Spreadsheet to review (.xlsx or .xls)
        file: PathBuf,
        /// Initial filter: name substring, case-insensitive
        #[arg(long)]
        name: Option<String>,
        /// Initial filter: tradition (Hindu, Sikh, Jain, Buddhist)
        #[arg(long)]
        tradition: Option<String>,
        /// Initial filter: status (valid, warning, error)
        #[arg(long)]
        status: Option<String>,
        /// Initial filter: state substring, case-insensitive
        #[arg(long)]
        state: Option<String>,
    },
    /// Write the normalized working set back out for offline correction
    Export {
        /// Spreadsheet to read (.xlsx or .xls)
        file: PathBuf,
        /// Destination .xlsx file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Push every non-error row into the database
    Import {
        /// Spreadsheet to import (.xlsx or .xls)
        file: PathBuf,
        /// Pause between records in milliseconds; 0 disables
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
        /// Walk the pipeline without any network calls
        #[arg(long)]
        dry_run: bool,
    },
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Clean up a two-sided household ledger sheet
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Ledger sheet normalizer and spending analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger config file (defaults to the user override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a ledger sheet and write the JSON output documents
    Process {
        /// Ledger sheet CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Directory for the output documents
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// User id for insert records (overrides the config)
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Print the insights report for a ledger sheet without writing anything
    Summary {
        /// Ledger sheet CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show how a description would be categorized
    Categorize {
        /// Description text as it appears in the sheet
        description: String,

        /// Amount as written in the income column (e.g. "₹500", "-200")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Inspect the ledger configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the override file location
    Path,
}

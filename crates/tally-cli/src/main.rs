//! Tally CLI - Household ledger sheet normalizer
//!
//! Usage:
//!   tally process --file CSV       Write clean, insert and analysis JSON
//!   tally summary --file CSV       Print the insights report
//!   tally categorize "bus ticket"  Show which rule a description hits
//!   tally config show              Print the effective configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Process {
            file,
            out_dir,
            user_id,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_process(config, &file, &out_dir, user_id)
        }
        Commands::Summary { file } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_summary(config, &file)
        }
        Commands::Categorize {
            description,
            amount,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_categorize(&config, &description, amount.as_deref())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = commands::load_config(cli.config.as_deref())?;
                commands::cmd_config_show(&config)
            }
            ConfigAction::Path => commands::cmd_config_path(cli.config.as_deref()),
        },
    }
}

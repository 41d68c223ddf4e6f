//! Config command implementations and shared config loading

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::config::{default_config_path, LedgerConfig};
use tracing::debug;

/// Load the ledger config, honoring `--config`
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    debug!(path = ?path, "Loading ledger config");
    LedgerConfig::load(path).context("Failed to load ledger config")
}

pub fn cmd_config_show(config: &LedgerConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(explicit: Option<&Path>) -> Result<()> {
    if let Some(path) = explicit {
        println!("{}", path.display());
        return Ok(());
    }

    let path = default_config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine a local data directory"))?;
    println!("{}", path.display());
    if !path.exists() {
        println!("   (not present, using built-in defaults)");
    }
    Ok(())
}

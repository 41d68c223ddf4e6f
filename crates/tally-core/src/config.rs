//! Ledger configuration: keyword tables, insert user id and output names
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override file (explicit path, or
//!    ~/.local/share/tally/config/ledger.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An override only needs the sections it changes. A `[[categories]]` list in
//! an override replaces the whole default table, since rule order matters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::categorize::CategoryRule;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/ledger.toml");

/// File names for the three output documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputNames {
    pub transactions: String,
    pub insert_records: String,
    pub analysis: String,
}

impl OutputNames {
    /// Names in write order: transactions, insert records, analysis
    pub fn all(&self) -> [&str; 3] {
        [&self.transactions, &self.insert_records, &self.analysis]
    }

    /// Every name must be a plain file name and the three must differ
    pub fn validate(&self) -> Result<()> {
        let names = self.all();
        for name in names {
            if !is_plain_file_name(name) {
                return Err(Error::Config(format!(
                    "Output name must be a plain file name: {:?}",
                    name
                )));
            }
        }
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(Error::Config(format!(
                    "Output name used for more than one document: {:?}",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed != "." && trimmed != ".." && !name.contains(['/', '\\'])
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            transactions: "clean_transactions.json".to_string(),
            insert_records: "supabase_insert.json".to_string(),
            analysis: "financial_analysis.json".to_string(),
        }
    }
}

/// Everything the pipeline needs besides the input rows
///
/// Field order matters for TOML output: plain values before tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerConfig {
    /// Written into every insert record
    pub user_id: String,
    /// Income-side descriptions containing one of these may be income
    pub income_keywords: Vec<String>,
    pub output: OutputNames,
    /// Ordered category rules, first match wins
    pub categories: Vec<CategoryRule>,
}

impl LedgerConfig {
    /// The compiled-in defaults
    pub fn embedded() -> Result<Self> {
        let mut config = Self::empty();
        apply(&mut config, parse_raw(DEFAULT_CONFIG)?)?;
        Ok(config)
    }

    /// Resolve config: explicit path, then default override path, then embedded
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        match override_path {
            Some(path) => {
                // An explicitly requested file must exist
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                debug!(path = %path.display(), "Loaded ledger config override");
                parse_config(&content)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let content = fs::read_to_string(&path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", path.display(), e))
                    })?;
                    debug!(path = %path.display(), "Loaded ledger config override");
                    parse_config(&content)
                }
                _ => Self::embedded(),
            },
        }
    }

    /// Render as TOML (same shape as the config file)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    fn empty() -> Self {
        Self {
            user_id: String::new(),
            income_keywords: Vec::new(),
            output: OutputNames::default(),
            categories: Vec::new(),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("ledger.toml"))
}

/// Parse an override on top of the embedded defaults
pub fn parse_config(content: &str) -> Result<LedgerConfig> {
    let mut config = LedgerConfig::embedded()?;
    apply(&mut config, parse_raw(content)?)?;
    Ok(config)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    user_id: Option<String>,
    income_keywords: Option<Vec<String>>,
    output: Option<RawOutput>,
    categories: Option<Vec<CategoryRule>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutput {
    transactions: Option<String>,
    insert_records: Option<String>,
    analysis: Option<String>,
}

fn parse_raw(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

fn apply(config: &mut LedgerConfig, raw: RawConfig) -> Result<()> {
    if let Some(user_id) = raw.user_id {
        if user_id.trim().is_empty() {
            return Err(Error::Config("user_id must not be empty".into()));
        }
        config.user_id = user_id;
    }

    if let Some(keywords) = raw.income_keywords {
        config.income_keywords = keywords;
    }

    if let Some(output) = raw.output {
        if let Some(name) = output.transactions {
            config.output.transactions = name;
        }
        if let Some(name) = output.insert_records {
            config.output.insert_records = name;
        }
        if let Some(name) = output.analysis {
            config.output.analysis = name;
        }
        // Checked after merging, since a single override can collide with a default
        config.output.validate()?;
    }

    if let Some(categories) = raw.categories {
        config.categories = categories;
    }

    Ok(())
}

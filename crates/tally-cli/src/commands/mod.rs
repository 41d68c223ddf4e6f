//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `config` - Config loading and inspection (show, path)
//! - `process` - Ledger processing commands (process, summary, categorize)

pub mod config;
pub mod process;

// Re-export command functions for main.rs
pub use config::*;
pub use process::*;

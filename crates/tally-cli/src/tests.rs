//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tally_core::config::LedgerConfig;

use crate::cli::{Cli, Commands, ConfigAction};
use crate::commands;

const SHEET: &str = "\
S.No,Date,Description,Note,Amount,,S.No,Date,Description,Note,Amount
1,01/03/2024,Salary,,25000,,1,02/03/2024,House rent,,8000
2,15/03/2024,Appa gpay,,2000,,2,03/03/2024,bus pass,,300
,TOTAL,,,27000,,,TOTAL,,,8300
";

fn default_config() -> LedgerConfig {
    LedgerConfig::embedded().unwrap()
}

fn write_sheet(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("ledger.csv");
    fs::write(&path, SHEET).unwrap();
    path
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_process_args() {
    let cli = Cli::parse_from([
        "tally",
        "process",
        "--file",
        "ledger.csv",
        "--out-dir",
        "out",
        "--user-id",
        "abc",
        "--verbose",
    ]);
    assert!(cli.verbose);
    match cli.command {
        Commands::Process {
            file,
            out_dir,
            user_id,
        } => {
            assert_eq!(file, PathBuf::from("ledger.csv"));
            assert_eq!(out_dir, PathBuf::from("out"));
            assert_eq!(user_id.as_deref(), Some("abc"));
        }
        _ => panic!("expected process command"),
    }
}

#[test]
fn test_parse_process_defaults() {
    let cli = Cli::parse_from(["tally", "process", "-f", "ledger.csv"]);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Process {
            out_dir, user_id, ..
        } => {
            assert_eq!(out_dir, PathBuf::from("."));
            assert!(user_id.is_none());
        }
        _ => panic!("expected process command"),
    }
}

#[test]
fn test_parse_categorize_negative_amount() {
    let cli = Cli::parse_from(["tally", "categorize", "bank charge", "--amount", "-50"]);
    match cli.command {
        Commands::Categorize {
            description,
            amount,
        } => {
            assert_eq!(description, "bank charge");
            assert_eq!(amount.as_deref(), Some("-50"));
        }
        _ => panic!("expected categorize command"),
    }
}

#[test]
fn test_parse_config_global_flag() {
    let cli = Cli::parse_from(["tally", "config", "show", "--config", "my.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Show
        }
    ));
}

// ========== Process Command Tests ==========

#[test]
fn test_cmd_process_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sheet(&dir);
    let out = dir.path().join("out");

    commands::cmd_process(default_config(), &file, &out, None).unwrap();

    for name in [
        "clean_transactions.json",
        "supabase_insert.json",
        "financial_analysis.json",
    ] {
        assert!(out.join(name).exists(), "{name} not written");
    }

    let clean: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("clean_transactions.json")).unwrap())
            .unwrap();
    assert_eq!(clean.as_array().unwrap().len(), 4);
}

#[test]
fn test_cmd_process_user_id_override() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sheet(&dir);
    let out = dir.path().join("out");

    commands::cmd_process(default_config(), &file, &out, Some("user-42".to_string())).unwrap();

    let inserts: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("supabase_insert.json")).unwrap())
            .unwrap();
    for record in inserts.as_array().unwrap() {
        assert_eq!(record["user_id"], "user-42");
    }
}

#[test]
fn test_cmd_process_empty_user_id() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sheet(&dir);
    let out = dir.path().join("out");

    let result = commands::cmd_process(default_config(), &file, &out, Some("  ".to_string()));
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_cmd_process_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let result = commands::cmd_process(
        default_config(),
        &dir.path().join("missing.csv"),
        &out,
        None,
    );
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_cmd_process_custom_output_names() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sheet(&dir);
    let out = dir.path().join("out");

    let config = tally_core::config::parse_config("[output]\nanalysis = \"report.json\"").unwrap();
    commands::cmd_process(config, &file, &out, None).unwrap();

    assert!(out.join("report.json").exists());
    assert!(!out.join("financial_analysis.json").exists());
}

// ========== Summary / Categorize Tests ==========

#[test]
fn test_cmd_summary_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sheet(&dir);

    commands::cmd_summary(default_config(), &file).unwrap();

    // Only the input sheet is in the directory
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_cmd_categorize() {
    let config = default_config();
    assert!(commands::cmd_categorize(&config, "bus ticket", None).is_ok());
    assert!(commands::cmd_categorize(&config, "Salary", Some("₹5,000")).is_ok());
    assert!(commands::cmd_categorize(&config, "Salary", Some("-")).is_ok());
    assert!(commands::cmd_categorize(&config, "", None).is_ok());
}

// ========== Config Command Tests ==========

#[test]
fn test_load_config_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.toml");
    fs::write(&path, "user_id = \"from-file\"\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.user_id, "from-file");

    assert!(commands::load_config(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn test_load_config_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.toml");
    fs::write(&path, "[[categories]]\nname = \"groceries\"\nkeywords = []\n").unwrap();

    let err = commands::load_config(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load ledger config"));
}

#[test]
fn test_cmd_config_show_and_path() {
    assert!(commands::cmd_config_show(&default_config()).is_ok());

    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_config_path(Some(dir.path())).is_ok());
}

//! Output documents and writing them to disk
//!
//! Three JSON documents are produced per run:
//! - the clean transaction list
//! - the same transactions as insert records (with `user_id`, without
//!   `needs_review`)
//! - the analysis summary with the rendered insights text
//!
//! All three are serialized up front and written through temporary files in
//! the target directory. A failed write removes whatever it already moved into
//! place and puts back the files it replaced, so a run never leaves a mix of
//! old and new documents behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info, warn};

use crate::analysis::{Analysis, CategoryTotal, DateRange, MonthlyTotals};
use crate::config::OutputNames;
use crate::error::{Error, Result};
use crate::models::{Category, Transaction, TransactionType};

/// A transaction shaped for bulk insertion into the `transactions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRecord {
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

impl InsertRecord {
    pub fn from_transaction(tx: &Transaction, user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            date: tx.date,
            transaction_type: tx.transaction_type,
            category: tx.category,
            amount: tx.amount,
            description: tx.description.clone(),
        }
    }
}

/// Convert transactions to insert records for one user
pub fn insert_records(transactions: &[Transaction], user_id: &str) -> Vec<InsertRecord> {
    transactions
        .iter()
        .map(|tx| InsertRecord::from_transaction(tx, user_id))
        .collect()
}

/// Headline figures of the analysis document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub date_range: DateRange,
    pub transaction_count: usize,
}

/// The analysis document as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub summary: AnalysisSummary,
    pub monthly_breakdown: Vec<MonthlyTotals>,
    pub top_categories: Vec<CategoryTotal>,
    pub insights: String,
}

impl AnalysisDocument {
    pub fn new(analysis: &Analysis, insights: impl Into<String>) -> Self {
        Self {
            summary: AnalysisSummary {
                total_income: analysis.total_income,
                total_expenses: analysis.total_expenses,
                net_balance: analysis.net_balance,
                date_range: analysis.date_range,
                transaction_count: analysis.transaction_count,
            },
            monthly_breakdown: analysis.monthly.clone(),
            top_categories: analysis.top_categories.clone(),
            insights: insights.into(),
        }
    }
}

/// The three serialized output documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    pub transactions: String,
    pub insert_records: String,
    pub analysis: String,
}

impl Documents {
    /// Serialize all three documents (pretty JSON, non-ASCII kept as-is)
    pub fn build(
        transactions: &[Transaction],
        user_id: &str,
        analysis: &AnalysisDocument,
    ) -> Result<Self> {
        Ok(Self {
            transactions: serde_json::to_string_pretty(transactions)?,
            insert_records: serde_json::to_string_pretty(&insert_records(transactions, user_id))?,
            analysis: serde_json::to_string_pretty(analysis)?,
        })
    }

    /// Write all documents into `dir`, creating it if needed.
    ///
    /// Returns the written paths in (transactions, insert records, analysis)
    /// order. Targets are checked and every document is staged in a temporary
    /// file before anything is moved into place. If moving one fails, the
    /// documents already moved are removed and any previous files restored.
    pub fn write_to(&self, dir: &Path, names: &OutputNames) -> Result<Vec<PathBuf>> {
        names
            .validate()
            .map_err(|e| Error::Output(format!("Invalid output names: {}", e)))?;

        fs::create_dir_all(dir)?;
        if !dir.is_dir() {
            return Err(Error::Output(format!("{} is not a directory", dir.display())));
        }

        let targets: Vec<PathBuf> = names.all().iter().map(|name| dir.join(name)).collect();
        for path in &targets {
            if let Ok(meta) = fs::symlink_metadata(path) {
                if !meta.is_file() {
                    return Err(Error::Output(format!(
                        "{} exists and is not a regular file",
                        path.display()
                    )));
                }
            }
        }

        let contents = [&self.transactions, &self.insert_records, &self.analysis];
        let mut staged = Vec::with_capacity(targets.len());
        for (path, content) in targets.into_iter().zip(contents) {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(content.as_bytes())?;
            tmp.flush()?;
            debug!(file = %path.display(), bytes = content.len(), "Staged output");
            staged.push((tmp, path));
        }

        let mut committed: Vec<Committed> = Vec::with_capacity(staged.len());
        for (tmp, path) in staged {
            match commit(dir, tmp, &path) {
                Ok(backup) => committed.push(Committed { path, backup }),
                Err(e) => {
                    rollback(committed);
                    return Err(e);
                }
            }
        }

        let written: Vec<PathBuf> = committed.into_iter().map(|c| c.path).collect();
        info!(dir = %dir.display(), files = written.len(), "Output written");
        Ok(written)
    }
}

/// A document moved into place, with the file it replaced (if any)
struct Committed {
    path: PathBuf,
    backup: Option<TempPath>,
}

/// Move a staged document to `path`, keeping any existing file as a backup
/// that is deleted when the returned handle drops.
fn commit(dir: &Path, tmp: NamedTempFile, path: &Path) -> Result<Option<TempPath>> {
    let backup = if path.exists() {
        let backup = NamedTempFile::new_in(dir)?.into_temp_path();
        fs::rename(path, &backup)?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = tmp.persist(path) {
        if let Some(backup) = &backup {
            if let Err(restore) = fs::rename(backup, path) {
                warn!(
                    path = %path.display(),
                    error = %restore,
                    "Failed to restore previous output"
                );
            }
        }
        return Err(Error::Output(format!(
            "Failed to write {}: {}",
            path.display(),
            e.error
        )));
    }

    Ok(backup)
}

/// Undo committed documents, newest first
fn rollback(committed: Vec<Committed>) {
    for entry in committed.into_iter().rev() {
        if let Err(e) = fs::remove_file(&entry.path) {
            warn!(
                path = %entry.path.display(),
                error = %e,
                "Failed to remove partial output"
            );
        }
        if let Some(backup) = entry.backup {
            if let Err(e) = fs::rename(&backup, &entry.path) {
                warn!(
                    path = %entry.path.display(),
                    error = %e,
                    "Failed to restore previous output"
                );
            }
        }
    }
}

//! Tally Core Library
//!
//! Shared functionality for the Tally ledger sheet normalizer:
//! - Two-sided ledger sheet import (income and expense side by side)
//! - Date and amount normalization for hand-kept spreadsheets
//! - Keyword categorization and income/expense classification
//! - Monthly and per-category analysis with a text insights report
//! - JSON output documents, written all-or-nothing
//! - Layered TOML configuration for keyword tables and output names

pub mod analysis;
pub mod categorize;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod insights;
pub mod models;
pub mod normalize;
pub mod pipeline;

pub use analysis::{analyze, Analysis, CategoryTotal, DateRange, MonthlyTotals};
pub use categorize::{Categorizer, CategoryMatch, CategoryRule};
pub use classify::TypeClassifier;
pub use config::{LedgerConfig, OutputNames};
pub use error::{Error, Result};
pub use export::{AnalysisDocument, Documents, InsertRecord};
pub use import::{Extraction, ImportStats, LedgerExtractor, LedgerSide, SideStats, SkipReason};
pub use insights::{render_insights, Recommendation};
pub use models::{Category, Transaction, TransactionType};
pub use normalize::{parse_amount, parse_date, DateRejection};
pub use pipeline::{Pipeline, PipelineOutput};

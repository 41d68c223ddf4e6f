//! Two-sided ledger sheet import
//!
//! The sheet keeps two independent ledgers side by side in every row:
//!
//! ```text
//! col:  0       1     2            3       4       5   6       7     8            9       10
//!       serial, date, description, (note), amount, ,   serial, date, description, (note), amount
//!       └────────── income side ──────────┘            └────────── expense side ─────────┘
//! ```
//!
//! Rows are split on every comma (no quoting). Row 0 is the header. Any
//! problem with one side of one row drops that side silently; the reason is
//! only counted in [`ImportStats`] and logged at debug level.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::ops::Range;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::categorize::Categorizer;
use crate::classify::TypeClassifier;
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::models::{Transaction, TransactionType};
use crate::normalize::{parse_amount, parse_date};

/// Column layout within one side: serial, date, description, unused, amount
const DATE_FIELD: usize = 1;
const DESCRIPTION_FIELD: usize = 2;
const AMOUNT_FIELD: usize = 4;

/// Which of the two ledgers a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LedgerSide {
    Income,
    Expense,
}

impl LedgerSide {
    /// Columns this side occupies in a row
    pub fn columns(&self) -> Range<usize> {
        match self {
            Self::Income => 0..5,
            Self::Expense => 6..11,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for LedgerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why one side of a row produced no transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Row has fewer fields than this side needs
    ShortRow,
    /// Date cell is empty
    EmptyDate,
    /// Date cell holds a TOTAL / Overall summary marker
    TotalMarker,
    /// Date cell could not be parsed into a calendar date
    InvalidDate,
    /// Amount is zero or unparseable
    ZeroAmount,
    /// Description is empty or whitespace
    BlankDescription,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortRow => "short row",
            Self::EmptyDate => "empty date",
            Self::TotalMarker => "total marker",
            Self::InvalidDate => "invalid date",
            Self::ZeroAmount => "zero amount",
            Self::BlankDescription => "blank description",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-side import counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideStats {
    pub emitted: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl SideStats {
    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Result of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    pub income: SideStats,
    pub expense: SideStats,
}

impl ImportStats {
    pub fn side(&self, side: LedgerSide) -> &SideStats {
        match side {
            LedgerSide::Income => &self.income,
            LedgerSide::Expense => &self.expense,
        }
    }

    fn side_mut(&mut self, side: LedgerSide) -> &mut SideStats {
        match side {
            LedgerSide::Income => &mut self.income,
            LedgerSide::Expense => &mut self.expense,
        }
    }
}

/// Transactions extracted from a sheet, sorted by date
#[derive(Debug, Clone)]
pub struct Extraction {
    pub transactions: Vec<Transaction>,
    pub stats: ImportStats,
}

/// Turns ledger rows into categorized transactions
#[derive(Debug, Clone)]
pub struct LedgerExtractor {
    categorizer: Categorizer,
    classifier: TypeClassifier,
}

impl LedgerExtractor {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            categorizer: Categorizer::new(&config.categories),
            classifier: TypeClassifier::new(&config.income_keywords),
        }
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    /// Read a whole sheet and extract both ledgers
    pub fn extract<R: Read>(&self, reader: R) -> Result<Extraction> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut records = rdr.records();
        // The header carries no data but a broken one is still a read error
        if let Some(header) = records.next() {
            header?;
        }

        let mut rows = Vec::new();
        for result in records {
            rows.push(result?);
        }

        Ok(self.extract_records(&rows))
    }

    /// Extract both ledgers from already-split data rows (header excluded).
    ///
    /// The income ledger is collected before the expense ledger and the final
    /// sort is stable, so on equal dates income rows come first.
    pub fn extract_records(&self, rows: &[StringRecord]) -> Extraction {
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..Default::default()
        };
        let mut transactions = Vec::new();

        for side in [LedgerSide::Income, LedgerSide::Expense] {
            for (idx, record) in rows.iter().enumerate() {
                match self.extract_side(side, record) {
                    Ok(tx) => {
                        stats.side_mut(side).emitted += 1;
                        transactions.push(tx);
                    }
                    Err(reason) => {
                        // Row numbers are 1-based with the header as row 1
                        debug!(
                            row = idx + 2,
                            side = side.as_str(),
                            reason = reason.as_str(),
                            "Skipped ledger entry"
                        );
                        stats.side_mut(side).skip(reason);
                    }
                }
            }
        }

        transactions.sort_by(|a, b| a.date.cmp(&b.date));

        info!(
            rows = stats.rows_read,
            income = stats.income.emitted,
            expense = stats.expense.emitted,
            skipped = stats.income.skipped_total() + stats.expense.skipped_total(),
            "Ledger extracted"
        );

        Extraction {
            transactions,
            stats,
        }
    }

    /// Build a transaction from one side of a row
    pub fn extract_side(
        &self,
        side: LedgerSide,
        record: &StringRecord,
    ) -> std::result::Result<Transaction, SkipReason> {
        let columns = side.columns();
        if record.len() < columns.end {
            return Err(SkipReason::ShortRow);
        }
        let field = |offset: usize| record.get(columns.start + offset).unwrap_or("");

        let raw_date = field(DATE_FIELD);
        let description = field(DESCRIPTION_FIELD);
        let raw_amount = field(AMOUNT_FIELD);

        if raw_date.is_empty() {
            return Err(SkipReason::EmptyDate);
        }
        if is_total_marker(side, raw_date) {
            return Err(SkipReason::TotalMarker);
        }
        if side == LedgerSide::Expense && description.is_empty() {
            return Err(SkipReason::BlankDescription);
        }

        let date = parse_date(raw_date).map_err(|_| SkipReason::InvalidDate)?;

        let amount = parse_amount(raw_amount);
        if amount == 0.0 {
            return Err(SkipReason::ZeroAmount);
        }

        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(SkipReason::BlankDescription);
        }

        let transaction_type = match side {
            LedgerSide::Income => self.classifier.classify(amount, description),
            LedgerSide::Expense => TransactionType::Expense,
        };

        Ok(Transaction {
            date,
            transaction_type,
            category: self.categorizer.categorize(description),
            amount: amount.abs(),
            description: trimmed.to_string(),
            needs_review: false,
        })
    }
}

/// Summary rows carry TOTAL (any case) in the date cell; the income ledger
/// also has an "Overall" line.
fn is_total_marker(side: LedgerSide, raw_date: &str) -> bool {
    if raw_date.to_uppercase().contains("TOTAL") {
        return true;
    }
    side == LedgerSide::Income && raw_date.contains("Overall")
}

//! Income vs expense classification for income-side ledger rows

use crate::models::TransactionType;

/// Decides the type of an income-side row from its signed amount and description
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    income_keywords: Vec<String>,
}

impl TypeClassifier {
    pub fn new(income_keywords: &[String]) -> Self {
        Self {
            income_keywords: income_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Income only when the description carries an income keyword and the
    /// amount is positive; everything else is an expense.
    pub fn classify(&self, amount: f64, description: &str) -> TransactionType {
        if amount > 0.0 && self.income_keyword(description).is_some() {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    /// First income keyword found in the description
    pub fn income_keyword(&self, description: &str) -> Option<&str> {
        let desc_lower = description.to_lowercase();
        self.income_keywords
            .iter()
            .find(|k| desc_lower.contains(k.as_str()))
            .map(String::as_str)
    }
}

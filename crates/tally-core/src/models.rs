//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending category labels
///
/// Declaration order is the canonical enumeration order: it is the default
/// keyword matching order and the tie-break order for category rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Education,
    Rent,
    Recharge,
    Shopping,
    Healthcare,
    PersonalCare,
    Entertainment,
    Bills,
    Electronics,
    Accessories,
    Home,
    Religious,
    Gifts,
    Investment,
    Miscellaneous,
}

impl Category {
    /// All categories in enumeration order
    pub const ALL: [Category; 17] = [
        Self::Food,
        Self::Transport,
        Self::Education,
        Self::Rent,
        Self::Recharge,
        Self::Shopping,
        Self::Healthcare,
        Self::PersonalCare,
        Self::Entertainment,
        Self::Bills,
        Self::Electronics,
        Self::Accessories,
        Self::Home,
        Self::Religious,
        Self::Gifts,
        Self::Investment,
        Self::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Education => "education",
            Self::Rent => "rent",
            Self::Recharge => "recharge",
            Self::Shopping => "shopping",
            Self::Healthcare => "healthcare",
            Self::PersonalCare => "personal_care",
            Self::Entertainment => "entertainment",
            Self::Bills => "bills",
            Self::Electronics => "electronics",
            Self::Accessories => "accessories",
            Self::Home => "home",
            Self::Religious => "religious",
            Self::Gifts => "gifts",
            Self::Investment => "investment",
            Self::Miscellaneous => "miscellaneous",
        }
    }

    /// Label for reports: first letter of each word upper-cased ("Personal_Care")
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.as_str().len());
        let mut at_word_start = true;
        for c in self.as_str().chars() {
            if c.is_alphabetic() {
                if at_word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                at_word_start = false;
            } else {
                out.push(c);
                at_word_start = true;
            }
        }
        out
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    /// Always positive; direction lives in `transaction_type`
    pub amount: f64,
    pub description: String,
    /// Reserved for manually flagged rows, never set by the importer
    pub needs_review: bool,
}

impl Transaction {
    /// Month bucket key (YYYY-MM)
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order_matches_declaration() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Rent < Category::Bills);
    }

    #[test]
    fn test_category_title() {
        assert_eq!(Category::Food.title(), "Food");
        assert_eq!(Category::PersonalCare.title(), "Personal_Care");
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            transaction_type: TransactionType::Expense,
            category: Category::PersonalCare,
            amount: 120.0,
            description: "haircut".to_string(),
            needs_review: false,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "personal_care");
        assert_eq!(json["needs_review"], false);
        assert_eq!(tx.month_key(), "2024-03");
    }
}

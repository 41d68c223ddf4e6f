//! Aggregation over a transaction list: totals, months, category ranking

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Transaction, TransactionType};

/// How many categories the ranking keeps
pub const TOP_CATEGORY_LIMIT: usize = 10;

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// YYYY-MM
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Total spend in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// First and last transaction dates, both `None` for an empty list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn include(&mut self, date: NaiveDate) {
        if self.start.map_or(true, |start| date < start) {
            self.start = Some(date);
        }
        if self.end.map_or(true, |end| date > end) {
            self.end = Some(date);
        }
    }
}

/// Aggregate view of a transaction list
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    /// Ascending by month
    pub monthly: Vec<MonthlyTotals>,
    /// Expense totals only; income never lands in a category
    pub category_totals: BTreeMap<Category, f64>,
    /// Highest spend first, ties in category order, at most [`TOP_CATEGORY_LIMIT`]
    pub top_categories: Vec<CategoryTotal>,
    pub transaction_count: usize,
    pub date_range: DateRange,
}

impl Analysis {
    /// Number of distinct months, floored at 1 for averaging
    pub fn month_divisor(&self) -> f64 {
        self.monthly.len().max(1) as f64
    }

    pub fn average_monthly_income(&self) -> f64 {
        self.total_income / self.month_divisor()
    }

    pub fn average_monthly_expense(&self) -> f64 {
        self.total_expenses / self.month_divisor()
    }

    /// Expense total for a category, 0 when nothing was spent
    pub fn category_total(&self, category: Category) -> f64 {
        self.category_totals.get(&category).copied().unwrap_or(0.0)
    }
}

/// Compute the analysis in one pass over the transactions
pub fn analyze(transactions: &[Transaction]) -> Analysis {
    let mut total_income = 0.0;
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut category_totals: BTreeMap<Category, f64> = BTreeMap::new();
    let mut date_range = DateRange::default();

    for tx in transactions {
        date_range.include(tx.date);

        let month = months.entry(tx.month_key()).or_insert((0.0, 0.0));
        match tx.transaction_type {
            TransactionType::Income => {
                total_income += tx.amount;
                month.0 += tx.amount;
            }
            TransactionType::Expense => {
                month.1 += tx.amount;
                *category_totals.entry(tx.category).or_insert(0.0) += tx.amount;
            }
        }
    }

    // Summed from the category totals so the two always agree to the bit
    let total_expenses: f64 = category_totals.values().sum();

    let monthly = months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect();

    let mut top_categories: Vec<CategoryTotal> = category_totals
        .iter()
        .map(|(&category, &amount)| CategoryTotal { category, amount })
        .collect();
    // Stable sort over category order keeps ties deterministic
    top_categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    top_categories.truncate(TOP_CATEGORY_LIMIT);

    Analysis {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        monthly,
        category_totals,
        top_categories,
        transaction_count: transactions.len(),
        date_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(
        date: &str,
        transaction_type: TransactionType,
        category: Category,
        amount: f64,
    ) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            transaction_type,
            category,
            amount,
            description: "test".to_string(),
            needs_review: false,
        }
    }

    #[test]
    fn test_empty() {
        let a = analyze(&[]);
        assert_eq!(a.total_income, 0.0);
        assert_eq!(a.total_expenses, 0.0);
        assert_eq!(a.transaction_count, 0);
        assert!(a.monthly.is_empty());
        assert!(a.top_categories.is_empty());
        assert_eq!(a.date_range, DateRange::default());
        assert_eq!(a.month_divisor(), 1.0);
    }

    #[test]
    fn test_totals_and_months() {
        let txs = vec![
            tx("2024-01-05", TransactionType::Income, Category::Miscellaneous, 1000.0),
            tx("2024-01-10", TransactionType::Expense, Category::Food, 200.0),
            tx("2024-02-01", TransactionType::Expense, Category::Rent, 1500.0),
            tx("2024-02-03", TransactionType::Income, Category::Food, 300.0),
        ];
        let a = analyze(&txs);

        assert_eq!(a.total_income, 1300.0);
        assert_eq!(a.total_expenses, 1700.0);
        assert_eq!(a.net_balance, -400.0);
        assert_eq!(a.transaction_count, 4);

        assert_eq!(a.monthly.len(), 2);
        assert_eq!(a.monthly[0].month, "2024-01");
        assert_eq!(a.monthly[0].income, 1000.0);
        assert_eq!(a.monthly[0].expenses, 200.0);
        assert_eq!(a.monthly[0].net, 800.0);
        assert_eq!(a.monthly[1].month, "2024-02");
        assert_eq!(a.monthly[1].net, -1200.0);

        // Income tagged food does not count toward the food total
        assert_eq!(a.category_total(Category::Food), 200.0);
        assert_eq!(a.category_total(Category::Miscellaneous), 0.0);

        assert_eq!(
            a.date_range,
            DateRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 5),
                end: NaiveDate::from_ymd_opt(2024, 2, 3),
            }
        );
        assert_eq!(a.average_monthly_expense(), 850.0);
    }

    #[test]
    fn test_category_totals_sum_to_expenses() {
        let txs = vec![
            tx("2024-01-01", TransactionType::Expense, Category::Food, 0.1),
            tx("2024-01-02", TransactionType::Expense, Category::Transport, 0.2),
            tx("2024-01-03", TransactionType::Expense, Category::Food, 0.3),
            tx("2024-01-04", TransactionType::Income, Category::Gifts, 99.9),
        ];
        let a = analyze(&txs);
        let sum: f64 = a.category_totals.values().sum();
        assert_eq!(sum, a.total_expenses);
    }

    #[test]
    fn test_top_categories_ranked_and_truncated() {
        let txs: Vec<Transaction> = Category::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| tx("2024-01-01", TransactionType::Expense, c, (i + 1) as f64))
            .collect();
        let a = analyze(&txs);

        assert_eq!(a.top_categories.len(), TOP_CATEGORY_LIMIT);
        assert_eq!(a.top_categories[0].category, Category::Miscellaneous);
        assert_eq!(a.top_categories[0].amount, 17.0);
        assert!(a
            .top_categories
            .windows(2)
            .all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn test_top_category_ties_follow_category_order() {
        let txs = vec![
            tx("2024-01-01", TransactionType::Expense, Category::Gifts, 50.0),
            tx("2024-01-02", TransactionType::Expense, Category::Bills, 50.0),
            tx("2024-01-03", TransactionType::Expense, Category::Food, 50.0),
            tx("2024-01-04", TransactionType::Expense, Category::Home, 80.0),
        ];
        let a = analyze(&txs);
        let order: Vec<Category> = a.top_categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![Category::Home, Category::Food, Category::Bills, Category::Gifts]
        );
    }
}

//! Human-readable summary of an [`Analysis`]
//!
//! Output is a markdown-ish text block: headline figures, an overspending
//! warning, the top five categories with their share of expenses, and a short
//! list of rule-based recommendations.

use chrono::NaiveDate;

use crate::analysis::Analysis;
use crate::models::Category;

/// How many categories the text ranking shows
pub const INSIGHT_CATEGORY_LIMIT: usize = 5;

/// Food spend above this share of the average monthly expense triggers advice
pub const FOOD_SHARE_THRESHOLD: f64 = 0.4;
/// Transport spend above this share of the average monthly expense triggers advice
pub const TRANSPORT_SHARE_THRESHOLD: f64 = 0.2;
/// Entertainment spend above this share of the average monthly expense triggers advice
pub const ENTERTAINMENT_SHARE_THRESHOLD: f64 = 0.15;

/// Advice lines the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    MealPlanning,
    TransportPasses,
    EntertainmentBudget,
    InvestSurplus,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MealPlanning => "Consider meal planning to reduce food expenses",
            Self::TransportPasses => "High transport costs - explore monthly passes or carpooling",
            Self::EntertainmentBudget => "Entertainment spending is high - set a monthly budget",
            Self::InvestSurplus => {
                "Great job maintaining positive balance! Consider investing surplus"
            }
        }
    }
}

/// Recommendations that apply, in display order.
///
/// Category thresholds compare the category's total over the whole period
/// with a fraction of the average monthly expense.
pub fn recommendations(analysis: &Analysis) -> Vec<Recommendation> {
    let avg_expense = analysis.average_monthly_expense();
    let rules = [
        (Category::Food, FOOD_SHARE_THRESHOLD, Recommendation::MealPlanning),
        (Category::Transport, TRANSPORT_SHARE_THRESHOLD, Recommendation::TransportPasses),
        (
            Category::Entertainment,
            ENTERTAINMENT_SHARE_THRESHOLD,
            Recommendation::EntertainmentBudget,
        ),
    ];

    let mut out: Vec<Recommendation> = rules
        .into_iter()
        .filter(|(category, share, _)| analysis.category_total(*category) > avg_expense * share)
        .map(|(_, _, rec)| rec)
        .collect();

    if analysis.net_balance > 0.0 {
        out.push(Recommendation::InvestSurplus);
    }
    out
}

/// Render the insights text block
pub fn render_insights(analysis: &Analysis) -> String {
    let mut lines = Vec::new();

    let period =
        |d: Option<NaiveDate>| d.map_or_else(|| "n/a".to_string(), |d| d.to_string());

    lines.push(format!(
        "📊 **Period**: {} to {}",
        period(analysis.date_range.start),
        period(analysis.date_range.end)
    ));
    lines.push(format!("📝 **Total Transactions**: {}", analysis.transaction_count));
    lines.push(format!("💰 **Total Income**: {}", format_rupees(analysis.total_income)));
    lines.push(format!("💸 **Total Expenses**: {}", format_rupees(analysis.total_expenses)));
    lines.push(format!("💵 **Net Balance**: {}", format_rupees(analysis.net_balance)));
    lines.push(format!(
        "📈 **Average Monthly Income**: {}",
        format_rupees(analysis.average_monthly_income())
    ));
    lines.push(format!(
        "📉 **Average Monthly Expense**: {}",
        format_rupees(analysis.average_monthly_expense())
    ));

    if analysis.net_balance < 0.0 {
        lines.push("⚠️ **WARNING**: You're spending more than you earn!".to_string());
    }

    lines.push("\n🏷️ **Top Spending Categories**:".to_string());
    for (i, entry) in analysis
        .top_categories
        .iter()
        .take(INSIGHT_CATEGORY_LIMIT)
        .enumerate()
    {
        let percentage = if analysis.total_expenses > 0.0 {
            entry.amount / analysis.total_expenses * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "  {}. {}: {} ({:.1}%)",
            i + 1,
            entry.category.title(),
            format_rupees(entry.amount),
            percentage
        ));
    }

    lines.push("\n💡 **Recommendations**:".to_string());
    for rec in recommendations(analysis) {
        lines.push(format!("  • {}", rec.message()));
    }

    lines.join("\n")
}

/// `₹` followed by the amount with thousands separators and two decimals
pub fn format_rupees(amount: f64) -> String {
    format!("₹{}", format_grouped(amount))
}

/// Two-decimal rendering with comma thousands separators ("-1,234.50")
pub fn format_grouped(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

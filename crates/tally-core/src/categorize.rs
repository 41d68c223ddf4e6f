//! Keyword-based category assignment
//!
//! Rules are an ordered list of (category, keywords). A description is
//! lower-cased and checked against each rule in turn; the first rule with a
//! keyword contained in the description decides the category. Keyword lists
//! may overlap, so the rule order is part of the output contract.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::Category;

/// Keywords that map a description to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    #[serde(rename = "name")]
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of matching a description against the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: Category,
    /// The keyword that decided it, `None` for the fallback
    pub keyword: Option<String>,
}

/// Ordered keyword matcher
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Build a categorizer, keeping rule order and lower-casing keywords
    pub fn new(rules: &[CategoryRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CategoryRule {
                category: rule.category,
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// Category for a description, `Miscellaneous` when nothing matches
    pub fn categorize(&self, description: &str) -> Category {
        self.explain(description).category
    }

    /// Like [`Categorizer::categorize`] but also reports the deciding keyword
    pub fn explain(&self, description: &str) -> CategoryMatch {
        if description.is_empty() {
            return CategoryMatch {
                category: Category::Miscellaneous,
                keyword: None,
            };
        }

        let desc_lower = description.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| desc_lower.contains(k.as_str())) {
                trace!(
                    category = rule.category.as_str(),
                    keyword = keyword.as_str(),
                    "Keyword match"
                );
                return CategoryMatch {
                    category: rule.category,
                    keyword: Some(keyword.clone()),
                };
            }
        }

        CategoryMatch {
            category: Category::Miscellaneous,
            keyword: None,
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;

    fn default_categorizer() -> Categorizer {
        let config = LedgerConfig::embedded().unwrap();
        Categorizer::new(&config.categories)
    }

    #[test]
    fn test_food() {
        let c = default_categorizer();
        assert_eq!(c.categorize("Bought chicken and rice"), Category::Food);
        assert_eq!(c.categorize("Evening TEA"), Category::Food);
    }

    #[test]
    fn test_overlap_resolved_by_rule_order() {
        let c = default_categorizer();
        // "electricity" is listed under rent before bills
        assert_eq!(c.categorize("monthly electricity bill"), Category::Rent);
        // "gift" is listed under entertainment before gifts
        assert_eq!(c.categorize("gift for friend"), Category::Entertainment);
        // "cream" is listed under healthcare before personal_care
        assert_eq!(c.categorize("face cream"), Category::Healthcare);
    }

    #[test]
    fn test_substring_matching() {
        let c = default_categorizer();
        // "ola" hides inside "chocolate", but food is checked before transport
        assert_eq!(c.categorize("chocolate bar"), Category::Food);
        // "water" only matches bills
        assert_eq!(c.categorize("Water can"), Category::Bills);
    }

    #[test]
    fn test_fallback() {
        let c = default_categorizer();
        assert_eq!(c.categorize(""), Category::Miscellaneous);
        assert_eq!(c.categorize("zzz"), Category::Miscellaneous);
    }

    #[test]
    fn test_explain_reports_keyword() {
        let c = default_categorizer();
        let m = c.explain("Rapido to station");
        assert_eq!(m.category, Category::Transport);
        assert_eq!(m.keyword.as_deref(), Some("rapido"));

        let m = c.explain("zzz");
        assert_eq!(m.category, Category::Miscellaneous);
        assert_eq!(m.keyword, None);
    }

    #[test]
    fn test_custom_rule_order() {
        let rules = vec![
            CategoryRule::new(Category::Bills, ["Electricity"]),
            CategoryRule::new(Category::Rent, ["electricity"]),
        ];
        let c = Categorizer::new(&rules);
        assert_eq!(c.categorize("ELECTRICITY"), Category::Bills);
        assert_eq!(c.rules()[0].keywords, vec!["electricity".to_string()]);
    }
}

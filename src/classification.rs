//! Domain classification table.
//!
//! Maps a record's domain tag to the category it is displayed under and to
//! the discipline label shown on each model. The table is passed into the
//! pipeline rather than read from a global so callers can swap it out.

use crate::constants::{DEFAULT_DOMAIN, GENERAL_DISCIPLINE};
use crate::error::{CatalogError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display metadata for one category bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub discipline: String,
}

impl CategoryMeta {
    fn new(name: &str, icon: &str, description: &str, discipline: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            discipline: discipline.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationTable {
    categories: HashMap<String, CategoryMeta>,
    disciplines: HashMap<String, String>,
}

static BUILTIN: Lazy<ClassificationTable> = Lazy::new(|| {
    let categories = [
        (
            "analysis",
            CategoryMeta::new(
                "Analytical Thinking",
                "🔍",
                "Frameworks for breaking problems apart and reasoning about them clearly",
                "Analysis",
            ),
        ),
        (
            "decision_making",
            CategoryMeta::new(
                "Decision Making",
                "⚖️",
                "Tools for choosing well under uncertainty and constraint",
                "Decision Science",
            ),
        ),
        (
            "systems",
            CategoryMeta::new(
                "Systems Thinking",
                "🔄",
                "Models of feedback, emergence and interdependence",
                "Systems Theory",
            ),
        ),
        (
            "psychology",
            CategoryMeta::new(
                "Psychology & Behavior",
                "🧠",
                "How people perceive, decide and act, including their biases",
                "Psychology",
            ),
        ),
        (
            "economics",
            CategoryMeta::new(
                "Economics & Incentives",
                "💰",
                "Scarcity, trade-offs and the incentives that shape behavior",
                "Economics",
            ),
        ),
        (
            "strategy",
            CategoryMeta::new(
                "Strategy & Competition",
                "♟️",
                "Positioning, leverage and competitive dynamics",
                "Strategy",
            ),
        ),
        (
            "learning",
            CategoryMeta::new(
                "Learning & Growth",
                "📚",
                "Ways to acquire, retain and transfer knowledge",
                "Education",
            ),
        ),
        (
            "communication",
            CategoryMeta::new(
                "Communication",
                "💬",
                "Framing, persuasion and shared understanding",
                "Communication",
            ),
        ),
    ];

    let disciplines = [
        ("analysis", "Analysis"),
        ("decision_making", "Decision Science"),
        ("systems", "Systems Theory"),
        ("psychology", "Psychology"),
        ("economics", "Economics"),
        ("strategy", "Strategy"),
        ("learning", "Education"),
        ("communication", "Communication"),
        ("physics", "Physics"),
        ("biology", "Biology"),
        ("mathematics", "Mathematics"),
        ("philosophy", "Philosophy"),
    ];

    ClassificationTable {
        categories: categories
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        disciplines: disciplines
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
});

impl Default for ClassificationTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl ClassificationTable {
    /// Build a table from explicit mappings. The default bucket (`analysis`)
    /// must be present.
    pub fn new(
        categories: HashMap<String, CategoryMeta>,
        disciplines: HashMap<String, String>,
    ) -> Result<Self> {
        if !categories.contains_key(DEFAULT_DOMAIN) {
            return Err(CatalogError::Config(format!(
                "classification table is missing the default '{}' category",
                DEFAULT_DOMAIN
            )));
        }
        Ok(Self {
            categories,
            disciplines,
        })
    }

    /// Bucket key a domain folds into: itself if known, otherwise the default.
    pub fn bucket_key<'a>(&self, domain: &'a str) -> &'a str {
        if self.categories.contains_key(domain) {
            domain
        } else {
            DEFAULT_DOMAIN
        }
    }

    pub fn category_for(&self, domain: &str) -> &CategoryMeta {
        // `new` and the builtin table both guarantee the default entry exists
        &self.categories[self.bucket_key(domain)]
    }

    pub fn discipline_for(&self, domain: Option<&str>) -> &str {
        domain
            .and_then(|d| self.disciplines.get(d))
            .map(String::as_str)
            .unwrap_or(GENERAL_DISCIPLINE)
    }

    pub fn into_parts(self) -> (HashMap<String, CategoryMeta>, HashMap<String, String>) {
        (self.categories, self.disciplines)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_domain_folds_into_default() {
        let table = ClassificationTable::default();
        assert_eq!(table.bucket_key("astrology"), "analysis");
        assert_eq!(table.category_for("astrology").name, "Analytical Thinking");
        assert_eq!(table.bucket_key("economics"), "economics");
    }

    #[test]
    fn test_discipline_lookup() {
        let table = ClassificationTable::default();
        assert_eq!(table.discipline_for(Some("physics")), "Physics");
        assert_eq!(table.discipline_for(Some("nope")), "General");
        assert_eq!(table.discipline_for(None), "General");
    }

    #[test]
    fn test_table_without_default_bucket_is_rejected() {
        let mut categories = HashMap::new();
        categories.insert(
            "economics".to_string(),
            CategoryMeta::new("Economics", "💰", "", "Economics"),
        );
        assert!(ClassificationTable::new(categories, HashMap::new()).is_err());
    }
}

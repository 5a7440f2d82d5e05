use crate::domain::MentalModelCategory;
use crate::pipeline::grouping::CategoryBuckets;
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use tracing::warn;

pub struct CategoryAssembler;

impl CategoryAssembler {
    /// Flatten the buckets into an array ordered by category name.
    pub fn assemble(buckets: CategoryBuckets) -> Vec<MentalModelCategory> {
        let collator = NameCollator::new();
        let mut keyed: Vec<(String, MentalModelCategory)> = buckets.into_iter().collect();
        // Bucket key breaks ties between same-named categories so HashMap
        // iteration order never leaks into the output.
        keyed.sort_by(|(ka, a), (kb, b)| {
            collator.compare(&a.name, &b.name).then_with(|| ka.cmp(kb))
        });
        keyed.into_iter().map(|(_, category)| category).collect()
    }
}

/// Unicode root-locale collation (accents sort with their base letter,
/// lowercase before uppercase on otherwise equal names).
pub struct NameCollator {
    collator: Option<Collator>,
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameCollator {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Root collator unavailable, falling back to code point order: {}", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(a, b).then_with(|| a.cmp(b)),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
        }
    }
}

/// One-off comparison; build a [`NameCollator`] when sorting many names.
pub fn collate(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> MentalModelCategory {
        MentalModelCategory {
            name: name.to_string(),
            icon: String::new(),
            description: String::new(),
            discipline: String::new(),
            models: Vec::new(),
        }
    }

    fn assembled_names(pairs: &[(&str, &str)]) -> Vec<String> {
        let mut buckets = CategoryBuckets::new();
        for (key, name) in pairs {
            buckets.insert(key.to_string(), category(name));
        }
        CategoryAssembler::assemble(buckets)
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_sorted_by_name() {
        let names = assembled_names(&[
            ("systems", "Systems Thinking"),
            ("analysis", "Analytical Thinking"),
            ("economics", "economics & Incentives"),
            ("decision_making", "Decision Making"),
        ]);
        assert_eq!(
            names,
            vec![
                "Analytical Thinking",
                "Decision Making",
                "economics & Incentives",
                "Systems Thinking"
            ]
        );
        assert!(names.windows(2).all(|w| collate(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let names = assembled_names(&[
            ("zen", "Zen"),
            ("ethics", "Ética"),
            ("analysis", "Análise"),
            ("economics", "Economia"),
        ]);
        assert_eq!(names, vec!["Análise", "Economia", "Ética", "Zen"]);
    }

    #[test]
    fn test_collate_ordering() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Ética", "Zen"), Ordering::Less);
        assert_eq!(collate("apple", "Apple"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_empty_buckets() {
        assert!(CategoryAssembler::assemble(CategoryBuckets::new()).is_empty());
    }
}

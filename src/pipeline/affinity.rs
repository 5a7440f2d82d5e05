use crate::constants::MAX_DRIVER_AFFINITIES;
use crate::types::{AffinityRecord, AffinityType};

/// Ranks a record's driver affinities into an ordered, capped list of driver
/// identifiers.
pub struct AffinityRanker;

impl AffinityRanker {
    /// Strongest `enables`/`requires` affinities first. Equal strengths keep
    /// their source order; entries whose driver has neither slug nor name are
    /// dropped before the cap is applied.
    pub fn rank(affinities: &[AffinityRecord]) -> Vec<String> {
        let mut ranked: Vec<&AffinityRecord> = affinities
            .iter()
            .filter(|a| match a.affinity_type {
                AffinityType::Enables | AffinityType::Requires => true,
                AffinityType::Other(_) => false,
            })
            .collect();

        // sort_by is stable; ties must keep source order
        ranked.sort_by(|a, b| strength(b).total_cmp(&strength(a)));

        ranked
            .into_iter()
            .filter_map(driver_identifier)
            .take(MAX_DRIVER_AFFINITIES)
            .collect()
    }
}

/// `total_cmp` orders -0.0 below 0.0; adding +0.0 folds the two together so
/// they tie like any other equal strengths.
fn strength(affinity: &AffinityRecord) -> f64 {
    match affinity.strength {
        Some(s) if !s.is_nan() => s + 0.0,
        _ => 0.0,
    }
}

fn driver_identifier(affinity: &AffinityRecord) -> Option<String> {
    let driver = affinity.driver.as_ref()?;
    [driver.slug.as_deref(), driver.name.as_deref()]
        .into_iter()
        .flatten()
        .find(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DriverRef;

    fn affinity(kind: &str, strength: Option<f64>, slug: Option<&str>) -> AffinityRecord {
        AffinityRecord {
            affinity_type: AffinityType::from(kind.to_string()),
            strength,
            driver: Some(DriverRef {
                slug: slug.map(str::to_string),
                name: None,
            }),
        }
    }

    #[test]
    fn test_equal_strength_keeps_source_order() {
        let ranked = AffinityRanker::rank(&[
            affinity("enables", Some(0.8), Some("d1")),
            affinity("requires", Some(0.8), Some("d2")),
            affinity("enables", Some(0.9), Some("d3")),
        ]);
        assert_eq!(ranked, vec!["d3", "d1", "d2"]);
    }

    #[test]
    fn test_other_types_never_ranked() {
        let ranked = AffinityRanker::rank(&[
            affinity("conflicts", Some(1.0), Some("impulsivity")),
            affinity("mitigates", Some(0.95), Some("fear")),
            affinity("enables", Some(0.1), Some("risk-aversion")),
        ]);
        assert_eq!(ranked, vec!["risk-aversion"]);
    }

    #[test]
    fn test_missing_strength_sorts_as_zero() {
        let ranked = AffinityRanker::rank(&[
            affinity("enables", None, Some("none")),
            affinity("enables", Some(-0.5), Some("negative")),
            affinity("requires", Some(0.2), Some("positive")),
            affinity("requires", Some(0.0), Some("zero")),
        ]);
        assert_eq!(ranked, vec!["positive", "none", "zero", "negative"]);
    }

    #[test]
    fn test_negative_zero_ties_with_missing_strength() {
        let ranked = AffinityRanker::rank(&[
            affinity("enables", Some(-0.0), Some("first")),
            affinity("requires", None, Some("second")),
            affinity("enables", Some(0.0), Some("third")),
        ]);
        assert_eq!(ranked, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_capped_at_five() {
        let affinities: Vec<_> = (0..8)
            .map(|i| affinity("enables", Some(i as f64 / 10.0), Some(&format!("d{i}"))))
            .collect();
        let ranked = AffinityRanker::rank(&affinities);
        assert_eq!(ranked, vec!["d7", "d6", "d5", "d4", "d3"]);
    }

    #[test]
    fn test_driver_fallbacks() {
        let named = AffinityRecord {
            affinity_type: AffinityType::Enables,
            strength: Some(0.9),
            driver: Some(DriverRef {
                slug: None,
                name: Some("Loss Aversion".to_string()),
            }),
        };
        let anonymous = AffinityRecord {
            affinity_type: AffinityType::Enables,
            strength: Some(0.8),
            driver: Some(DriverRef::default()),
        };
        let missing = AffinityRecord {
            affinity_type: AffinityType::Requires,
            strength: Some(0.7),
            driver: None,
        };
        let blank = affinity("requires", Some(0.6), Some(""));

        let ranked = AffinityRanker::rank(&[named, anonymous, missing, blank]);
        assert_eq!(ranked, vec!["Loss Aversion"]);
    }

    #[test]
    fn test_dropped_entries_do_not_count_against_cap() {
        let mut affinities = vec![AffinityRecord {
            affinity_type: AffinityType::Enables,
            strength: Some(1.0),
            driver: None,
        }];
        affinities.extend((0..5).map(|i| affinity("requires", Some(0.5), Some(&format!("d{i}")))));
        assert_eq!(AffinityRanker::rank(&affinities).len(), 5);
    }
}

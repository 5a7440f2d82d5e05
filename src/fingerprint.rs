use crate::types::CatalogRecord;
use sha2::{Digest, Sha256};

/// SHA-256 over the canonical JSON of a record list. Two fetches that return
/// the same rows in the same order share a fingerprint.
pub fn fingerprint_records(records: &[CatalogRecord]) -> Option<String> {
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, records).ok()?;
    Some(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> CatalogRecord {
        CatalogRecord {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_fingerprint_is_content_based() {
        let a = vec![named("Inversion"), named("Occam's Razor")];
        let b = vec![named("Inversion"), named("Occam's Razor")];
        let reordered = vec![named("Occam's Razor"), named("Inversion")];

        let fa = fingerprint_records(&a).unwrap();
        assert_eq!(fa.len(), 64);
        assert_eq!(Some(fa.clone()), fingerprint_records(&b));
        assert_ne!(Some(fa), fingerprint_records(&reordered));
    }
}

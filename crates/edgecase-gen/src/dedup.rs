//! Deduplication by canonical key

use crate::canonical::{CanonicalForm, canonicalize};
use crate::case::RawCase;
use std::collections::HashSet;
use tracing::trace;

/// A case with its canonical form attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedCase {
    /// The case, content untouched
    pub case: RawCase,
    /// Canonical form, computed once
    pub canonical: CanonicalForm,
}

impl KeyedCase {
    /// Canonical key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.canonical.key
    }
}

/// Keep the first case per canonical key, in pool order
///
/// The pool order is the family's catalog order, so the survivor of a
/// collision is stable across runs.
#[must_use]
pub fn dedup(pool: Vec<RawCase>, tags: &[String]) -> Vec<KeyedCase> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter_map(|case| {
            let canonical = canonicalize(&case, tags);
            if seen.insert(canonical.key.clone()) {
                Some(KeyedCase { case, canonical })
            } else {
                trace!(id = %case.id, key = %canonical.key, "dropping duplicate");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Payload, ShapeKind};
    use crate::problem::InputShape;

    fn array(slug: &str, values: Vec<i64>) -> RawCase {
        RawCase::from_payload(
            slug,
            slug,
            &["boundary"],
            Payload::Array { values },
            InputShape::Single,
        )
    }

    #[test]
    fn test_first_occurrence_wins() {
        let pool = vec![
            array("first", vec![0, 0, 0]),
            array("second", vec![1, 2]),
            array("third", vec![0, 0, 0]),
        ];
        let unique = dedup(pool, &[]);
        let ids: Vec<&str> = unique.iter().map(|k| k.case.id.as_str()).collect();
        assert_eq!(ids, vec!["array:first", "array:second"]);
    }

    #[test]
    fn test_formatting_differences_collapse() {
        let pool = vec![
            array("generated", vec![4, 5]),
            RawCase::manual("typed", ShapeKind::Array, "2\n4   5\n", None),
        ];
        assert_eq!(dedup(pool, &[]).len(), 1);
    }

    #[test]
    fn test_keys_unique_after_dedup() {
        let pool: Vec<RawCase> = (0..10)
            .map(|i| array(&format!("c{i}"), vec![i % 3]))
            .collect();
        let unique = dedup(pool, &[]);
        let keys: HashSet<&str> = unique.iter().map(KeyedCase::key).collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_empty_pool() {
        assert!(dedup(Vec::new(), &[]).is_empty());
    }
}

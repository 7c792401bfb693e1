// ABOUTME: Exact-match resolution cache over the reference table with fixed provenance
// ABOUTME: Returns a Hit carrying a confidence-tagged estimate or a first-class Miss
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::normalizer::normalize;
use super::reference_table::ReferenceTable;
use crate::constants::resolution::{CACHE_CONFIDENCE, CACHE_SOURCE_LABEL};
use crate::errors::AppResult;
use crate::models::NutritionEstimate;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of a cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// The canonical text matched a reference entry
    Hit(NutritionEstimate),
    /// No reference entry for the canonical text
    Miss,
}

impl CacheLookup {
    /// Whether this is a hit
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// The estimate, if this is a hit
    #[must_use]
    pub fn into_estimate(self) -> Option<NutritionEstimate> {
        match self {
            Self::Hit(estimate) => Some(estimate),
            Self::Miss => None,
        }
    }
}

/// Read-only cache answering "do we already know this food?"
///
/// Lookups are exact matches on the canonical key. There is no fuzzy,
/// substring or stemmed matching, and the cache never mutates.
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    table: Arc<ReferenceTable>,
}

impl ResolutionCache {
    /// Wrap an already validated table
    #[must_use]
    pub const fn new(table: Arc<ReferenceTable>) -> Self {
        Self { table }
    }

    /// Cache over the built-in reference table
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the built-in data is malformed
    pub fn builtin() -> AppResult<Self> {
        Ok(Self::new(ReferenceTable::builtin()?))
    }

    /// Look up an already canonical key
    #[must_use]
    pub fn lookup(&self, canonical: &str) -> CacheLookup {
        self.table.get(canonical).map_or(CacheLookup::Miss, |fact| {
            CacheLookup::Hit(NutritionEstimate::new(
                fact.clone(),
                CACHE_CONFIDENCE,
                vec![CACHE_SOURCE_LABEL.to_owned()],
            ))
        })
    }

    /// Normalize raw text, then look it up
    #[must_use]
    pub fn lookup_raw(&self, raw_text: &str) -> CacheLookup {
        self.lookup(&normalize(raw_text))
    }

    /// Whether an already canonical key is known
    #[must_use]
    pub fn contains(&self, canonical: &str) -> bool {
        self.table.contains(canonical)
    }

    /// Whether raw text resolves to a known key once normalized
    #[must_use]
    pub fn is_cached(&self, raw_text: &str) -> bool {
        self.contains(&normalize(raw_text))
    }

    /// All canonical keys (diagnostics only)
    #[must_use]
    pub fn list_keys(&self) -> BTreeSet<&str> {
        self.table.keys()
    }

    /// The underlying table
    #[must_use]
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> ResolutionCache {
        ResolutionCache::builtin().unwrap()
    }

    #[test]
    fn test_exact_match_only() {
        let cache = cache();
        assert!(cache.lookup("apple").is_hit());
        assert_eq!(cache.lookup("green apple"), CacheLookup::Miss);
        assert_eq!(cache.lookup("apples"), CacheLookup::Miss);
        assert_eq!(cache.lookup("appl"), CacheLookup::Miss);
    }

    #[test]
    fn test_lookup_expects_canonical_key() {
        let cache = cache();
        assert_eq!(cache.lookup("Apple"), CacheLookup::Miss);
        assert!(cache.lookup_raw("  Apple ").is_hit());
    }

    #[test]
    fn test_hit_provenance() {
        let estimate = cache().lookup("banana").into_estimate().unwrap();
        assert!((estimate.confidence - 0.95).abs() < f64::EPSILON);
        assert_eq!(estimate.sources, vec!["USDA FoodData Central (Cached)"]);
    }

    #[test]
    fn test_every_hit_copies_fact_unchanged() {
        let cache = cache();
        for key in cache.list_keys() {
            let expected = cache.table().get(key).unwrap();
            let estimate = cache.lookup(key).into_estimate().unwrap();
            assert_eq!(&estimate.fact, expected, "fact differs for {key}");
            assert!((estimate.confidence - CACHE_CONFIDENCE).abs() < f64::EPSILON);
            assert_eq!(estimate.sources.len(), 1);
        }
    }

    #[test]
    fn test_contains_and_is_cached() {
        let cache = cache();
        assert!(cache.contains("hot dog"));
        assert!(!cache.contains("Hot Dog"));
        assert!(cache.is_cached("Hot   Dog"));
        assert!(!cache.is_cached("corn dog"));
    }

    #[test]
    fn test_list_keys_sorted_and_complete() {
        let cache = cache();
        let keys: Vec<&str> = cache.list_keys().into_iter().collect();
        assert_eq!(keys.len(), 48);
        assert_eq!(keys.first(), Some(&"almonds"));
        assert_eq!(keys.last(), Some(&"yogurt"));
    }
}

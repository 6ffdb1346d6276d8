//! Suggestion filter
//!
//! Bridges raw user input to the dataset through the query cache:
//! normalize, look up, scan on miss, store, return.

use std::sync::Arc;

use searchdata::{Dataset, Record, Result};

use crate::cache::QueryCache;
use crate::stats::CacheStats;

/// Strip all whitespace and lowercase
///
/// Queries and record names both pass through here, so `"re act"` and
/// `"React"` land on the same form. Stripping (not collapsing)
/// whitespace lets a query match across word boundaries in a name.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Search front-end combining a dataset with an LRU query cache
///
/// Owns its cache instance; created at session start, discarded with
/// the session, never shared between unrelated filters.
pub struct SearchFilter {
    dataset: Arc<Dataset>,
    cache: QueryCache<Arc<[Record]>>,
}

impl SearchFilter {
    /// Create a filter over `dataset` with the given cache capacity
    pub fn new(dataset: Arc<Dataset>, capacity: usize) -> Result<Self> {
        Ok(Self {
            dataset,
            cache: QueryCache::new(capacity)?,
        })
    }

    /// Return every record whose normalized name contains the
    /// normalized query, in dataset order
    ///
    /// Empty input short-circuits to an empty result without touching
    /// the cache. Repeated queries are served from the cache and skip
    /// the dataset scan entirely.
    pub fn filter(&self, raw: &str) -> Arc<[Record]> {
        if raw.is_empty() {
            return Arc::new([]);
        }

        let key = normalize(raw);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let matches: Vec<Record> = self
            .dataset
            .scan()
            .filter(|record| normalize(&record.name).contains(&key))
            .cloned()
            .collect();

        let results: Arc<[Record]> = matches.into();
        self.cache.put(key, Arc::clone(&results));
        results
    }

    /// Dataset backing this filter
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Cache hit/miss counters
    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Number of queries currently cached
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Configured cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Drop all cached results; the dataset is untouched
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
        }
    }

    fn sample() -> Arc<Dataset> {
        Arc::new(
            Dataset::from_records(vec![
                record(1, "React Basics"),
                record(2, "Redux Guide"),
                record(3, "Vue Tutorial"),
            ])
            .unwrap(),
        )
    }

    fn filter(capacity: usize) -> SearchFilter {
        SearchFilter::new(sample(), capacity).unwrap()
    }

    #[test]
    fn test_normalize_strips_whitespace_and_case() {
        assert_eq!(normalize("Re Act"), "react");
        assert_eq!(normalize("  Redux\tGuide "), "reduxguide");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_query_matches_across_word_boundary() {
        let filter = filter(10);

        let results = filter.filter("re act");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0], record(1, "React Basics"));
    }

    #[test]
    fn test_repeated_query_skips_the_scan() {
        let filter = filter(10);

        let first = filter.filter("re act");
        let second = filter.filter("re act");

        assert_eq!(first, second);
        assert_eq!(filter.dataset().scan_count(), 1);
        assert_eq!(filter.stats().hits(), 1);
        assert_eq!(filter.stats().misses(), 1);
    }

    #[test]
    fn test_empty_query_is_not_cached() {
        let filter = filter(10);

        let results = filter.filter("");

        assert!(results.is_empty());
        assert_eq!(filter.cache_len(), 0);
        assert_eq!(filter.dataset().scan_count(), 0);
        assert_eq!(filter.stats().misses(), 0);
    }

    #[test]
    fn test_case_insensitive_match() {
        let filter = filter(10);

        let results = filter.filter("REDUX");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn test_results_preserve_dataset_order() {
        let filter = filter(10);

        let ids: Vec<u64> = filter.filter("e").iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_result_set_is_cached() {
        let filter = filter(10);

        assert!(filter.filter("zzz").is_empty());
        assert!(filter.filter("zzz").is_empty());

        assert_eq!(filter.cache_len(), 1);
        assert_eq!(filter.dataset().scan_count(), 1);
        assert_eq!(filter.stats().hits(), 1);
    }

    #[test]
    fn test_whitespace_only_query_matches_everything() {
        // "   " normalizes to "" and every name contains "";
        // the observed widget behavior, kept as-is
        let filter = filter(10);

        assert_eq!(filter.filter("   ").len(), 3);
    }

    #[test]
    fn test_eviction_forces_a_rescan() {
        let filter = filter(1);

        filter.filter("react");
        filter.filter("vue");
        filter.filter("react");

        assert_eq!(filter.dataset().scan_count(), 3);
        assert_eq!(filter.stats().evictions(), 2);
    }

    #[test]
    fn test_clear_cache_forces_a_rescan() {
        let filter = filter(10);

        filter.filter("react");
        filter.clear_cache();
        filter.filter("react");

        assert_eq!(filter.dataset().scan_count(), 2);
    }
}

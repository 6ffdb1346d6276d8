//! Thread-safe query cache
//!
//! String-keyed front over the LRU core. Lookups and stores take one
//! lock over the hash index and the recency list together, so a hit's
//! read-then-reorder cannot be torn by a concurrent store.

use parking_lot::Mutex;
use searchdata::Result;

use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Bounded cache mapping normalized query strings to result payloads
///
/// The payload is opaque to the cache; an empty result sequence is a
/// valid cached value, distinct from a miss. Keys are compared by exact
/// string equality on whatever form the caller supplies; normalization
/// is the caller's job.
pub struct QueryCache<V> {
    inner: Mutex<LruCache<String, V>>,
    stats: CacheStats,
    capacity: usize,
}

impl<V: Clone> QueryCache<V> {
    /// Create a cache with room for `capacity` queries
    ///
    /// Capacity zero is rejected with
    /// [`searchdata::Error::InvalidCapacity`], never clamped.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)?),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Look up a cached result
    ///
    /// A hit clones the payload out and refreshes the key's recency. A
    /// miss returns `None` and mutates nothing.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock();
        match inner.get(key) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Store a result under `key`
    ///
    /// Overwriting an existing key refreshes its recency without
    /// consuming capacity. A store that would grow the cache past its
    /// bound first evicts exactly the least-recently-used entry.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.lock();
        if inner.put(key.into(), value).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_store();
    }

    /// Drop a single key, returning its value
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Drop every entry and zero the counters
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }

    /// Current number of cached queries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hit/miss/store/eviction counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchdata::Error;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            QueryCache::<Vec<u32>>::new(0),
            Err(Error::InvalidCapacity)
        ));
    }

    #[test]
    fn test_miss_then_hit_round_trip() {
        let cache = QueryCache::new(2).unwrap();

        assert!(cache.get("react").is_none());

        cache.put("react", vec![1u32]);
        assert_eq!(cache.get("react"), Some(vec![1]));
    }

    #[test]
    fn test_cached_empty_value_is_not_a_miss() {
        let cache = QueryCache::new(2).unwrap();

        cache.put("zzz", Vec::<u32>::new());

        assert_eq!(cache.get("zzz"), Some(Vec::new()));
    }

    #[test]
    fn test_overwrite_keeps_one_entry() {
        let cache = QueryCache::new(2).unwrap();

        cache.put("react", vec![1u32]);
        cache.put("react", vec![2u32]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("react"), Some(vec![2]));
    }

    #[test]
    fn test_counters() {
        let cache = QueryCache::new(1).unwrap();

        cache.get("a");
        cache.put("a", vec![1u32]);
        cache.get("a");
        cache.put("b", vec![2u32]);

        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().stores(), 2);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_remove() {
        let cache = QueryCache::new(2).unwrap();

        cache.put("a", vec![1u32]);

        assert_eq!(cache.remove("a"), Some(vec![1]));
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_clear_resets_entries_and_counters() {
        let cache = QueryCache::new(2).unwrap();

        cache.put("a", vec![1u32]);
        cache.get("a");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().stores(), 0);
    }
}

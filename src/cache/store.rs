//! Cache Store Module
//!
//! Response cache keyed by the verbatim path-and-query of the inbound request.

use std::collections::HashMap;

use axum::body::Bytes;

use crate::cache::CacheStats;

// == Cache Store ==
/// In-memory response cache.
///
/// Holds at most one body per key. There is no expiry and no eviction: the
/// store only shrinks when [`CacheStore::clear`] is called.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Path-and-query to origin response body
    entries: HashMap<String, Bytes>,
    /// Lookup statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up the body stored for `key`.
    ///
    /// Keys are compared byte for byte, so `/a` and `/a/` are different
    /// entries. Every call is counted as a hit or a miss.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(body) => {
                self.stats.record_hit();
                Some(body.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `body` under `key`, replacing any previous body.
    pub fn put(&mut self, key: impl Into<String>, body: Bytes) {
        self.entries.insert(key.into(), body);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Removes every entry and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Contains ==
    /// Returns true if a body is stored for `key`, without touching the stats.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new();

        store.put("/users?page=1", Bytes::from_static(b"[1,2,3]"));
        let body = store.get("/users?page=1").unwrap();

        assert_eq!(body, Bytes::from_static(b"[1,2,3]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_absent() {
        let mut store = CacheStore::new();
        assert!(store.get("/missing").is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.put("/item", Bytes::from_static(b"old"));
        store.put("/item", Bytes::from_static(b"new"));

        assert_eq!(store.get("/item").unwrap(), Bytes::from_static(b"new"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_put_is_idempotent() {
        let mut store = CacheStore::new();

        store.put("/item", Bytes::from_static(b"same"));
        store.put("/item", Bytes::from_static(b"same"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("/item").unwrap(), Bytes::from_static(b"same"));
    }

    #[test]
    fn test_store_keys_are_not_normalized() {
        let mut store = CacheStore::new();

        store.put("/a", Bytes::from_static(b"plain"));
        store.put("/a?x=1", Bytes::from_static(b"x1"));

        assert!(store.get("/a/").is_none());
        assert!(store.get("/A").is_none());
        assert!(store.get("/a?x=2").is_none());
        assert!(store.get("/a?x=%31").is_none());
        assert_eq!(store.get("/a?x=1").unwrap(), Bytes::from_static(b"x1"));
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new();

        store.put("/one", Bytes::from_static(b"1"));
        store.put("/two", Bytes::from_static(b"2"));

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(store.get("/one").is_none());
        assert!(store.get("/two").is_none());
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_store_clear_empty() {
        let mut store = CacheStore::new();
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn test_store_contains_key_does_not_count() {
        let mut store = CacheStore::new();
        store.put("/one", Bytes::from_static(b"1"));

        assert!(store.contains_key("/one"));
        assert!(!store.contains_key("/two"));

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.put("/one", Bytes::from_static(b"1"));
        store.get("/one"); // hit
        store.get("/two"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}

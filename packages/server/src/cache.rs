//! Time-bounded response cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default lifetime of a cached entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A map whose entries expire `ttl` after insertion.
///
/// Expired entries are evicted when read and swept on every insert.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns a clone of the live entry for `key`.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some((inserted, value)) if now.duration_since(*inserted) < self.ttl => {
                return Some(value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.evict_expired(now);
        self.entries.insert(key, (now, value));
    }

    fn evict_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (inserted, _)| now.duration_since(*inserted) < ttl);
    }

    /// Number of stored entries, including any not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_live_entries() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("raleigh", 3);
        assert_eq!(cache.get(&"raleigh"), Some(3));
        assert_eq!(cache.get(&"durham"), None);
    }

    #[test]
    fn evicts_expired_entries_on_read() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("raleigh", 3, start);

        assert_eq!(
            cache.get_at(&"raleigh", start + Duration::from_secs(59)),
            Some(3)
        );
        assert_eq!(
            cache.get_at(&"raleigh", start + Duration::from_secs(60)),
            None
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_refreshes_entry() {
        let mut cache = TtlCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("a", 1, start);
        cache.insert_at("a", 2, start + Duration::from_secs(8));

        assert_eq!(cache.get_at(&"a", start + Duration::from_secs(15)), Some(2));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_sweeps_expired_keys_that_are_never_read() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        for radius in 0..1_000 {
            cache.insert_at(format!("raleigh-nc:{radius}:miles"), radius, start);
        }
        assert_eq!(cache.len(), 1_000);

        let later = start + Duration::from_secs(3_600);
        cache.insert_at("durham-nc:25:miles".to_string(), 25, later);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_at(&"durham-nc:25:miles".to_string(), later), Some(25));
    }

    #[test]
    fn insert_keeps_live_entries() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("a", 1, start);
        cache.insert_at("b", 2, start + Duration::from_secs(30));
        cache.insert_at("c", 3, start + Duration::from_secs(70));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at(&"b", start + Duration::from_secs(70)), Some(2));
    }
}

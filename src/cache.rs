// Time-boxed cache for fetched season data.
//
// Replaces the implicit process-wide cache the original UI framework kept:
// an explicit map from key to value with an insert-time expiry, owned by the
// app orchestrator and decoupled from any UI callback lifecycle.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A map with a fixed time-to-live applied to every entry.
///
/// Entries expire `ttl` after insertion; expired entries are evicted lazily
/// on access. A TTL of zero disables caching entirely (every entry is
/// already expired when read back).
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Insert a value, replacing (and re-timestamping) any existing entry.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Fetch a live entry. Evicts and returns `None` when the entry has
    /// passed its TTL.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Drop every entry regardless of age (explicit refresh).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every expired entry. Useful on a periodic tick so abandoned
    /// (year, team) selections don't accumulate.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache: TtlCache<u16, Vec<i32>> = TtlCache::new(Duration::from_secs(3600));
        cache.insert(2024, vec![1, 2, 3]);
        assert_eq!(cache.get(&2024), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_is_none() {
        let mut cache: TtlCache<u16, i32> = TtlCache::new(Duration::from_secs(3600));
        assert_eq!(cache.get(&2024), None);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache: TtlCache<u16, i32> = TtlCache::new(Duration::ZERO);
        cache.insert(2024, 7);
        assert_eq!(cache.get(&2024), None);
        assert!(cache.is_empty(), "expired entry should be evicted on read");
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut cache: TtlCache<u16, i32> = TtlCache::new(Duration::from_secs(3600));
        cache.insert(2024, 1);
        cache.insert(2024, 2);
        assert_eq!(cache.get(&2024), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn composite_keys_are_independent() {
        let mut cache: TtlCache<(u16, String), i32> =
            TtlCache::new(Duration::from_secs(3600));
        cache.insert((2024, "LAD".into()), 1);
        cache.insert((2024, "NYY".into()), 2);
        cache.insert((2023, "LAD".into()), 3);
        assert_eq!(cache.get(&(2024, "LAD".into())), Some(&1));
        assert_eq!(cache.get(&(2023, "LAD".into())), Some(&3));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn clear_drops_live_entries() {
        let mut cache: TtlCache<u16, i32> = TtlCache::new(Duration::from_secs(3600));
        cache.insert(2024, 1);
        cache.clear();
        assert_eq!(cache.get(&2024), None);
    }

    #[test]
    fn purge_drops_expired_entries() {
        let mut cache: TtlCache<u16, i32> = TtlCache::new(Duration::ZERO);
        cache.insert(2023, 1);
        cache.insert(2024, 2);
        cache.purge_expired();
        assert!(cache.is_empty());
    }
}

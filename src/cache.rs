//! In-process TTL cache for search responses.
//!
//! Entries are evicted lazily on lookup once `now >= expires_at`; there is
//! no background sweep. Writes always replace the stored entry. The mutex
//! covers the whole read-check-write sequence so an expired entry can never
//! be observed under concurrent access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Time source for expiry decisions. Injected so tests can advance time
/// without wall-clock waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new(ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::milliseconds(i64::try_from(ttl_ms).unwrap_or(i64::MAX)),
            clock,
        }
    }

    /// Returns the live value for `key`, evicting it first if expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key` with expiry `now + ttl`, replacing any
    /// previous entry.
    pub fn insert(&self, key: &str, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    #[test]
    fn live_entries_are_returned() {
        let clock = ManualClock::starting_at(epoch());
        let cache = TtlCache::new(5_000, clock.clone());

        cache.insert("key", "value".to_string());
        clock.advance(Duration::milliseconds(4_999));
        assert_eq!(cache.get("key"), Some("value".to_string()));
    }

    #[test]
    fn expired_entries_are_evicted_on_lookup() {
        let clock = ManualClock::starting_at(epoch());
        let cache = TtlCache::new(5_000, clock.clone());

        cache.insert("key", 1);
        clock.advance(Duration::milliseconds(5_000));
        assert_eq!(cache.get("key"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces_and_refreshes_expiry() {
        let clock = ManualClock::starting_at(epoch());
        let cache = TtlCache::new(5_000, clock.clone());

        cache.insert("key", 1);
        clock.advance(Duration::milliseconds(3_000));
        cache.insert("key", 2);
        clock.advance(Duration::milliseconds(3_000));

        // 6s after the first write but only 3s after the replacement.
        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_isolated() {
        let clock = ManualClock::starting_at(epoch());
        let cache = TtlCache::new(5_000, clock);

        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), None);
    }
}

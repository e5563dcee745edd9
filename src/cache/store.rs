//! Generic keyed cache with per-entry expiry and LRU eviction.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Bounded cache where an entry is either fresh or absent.
///
/// Expired entries are dropped lazily on access. When an insert would exceed
/// capacity, expired entries are purged first and the least-recently-used live
/// entry is evicted only if that did not free a slot.
pub struct TtlLruCache<K: Hash + Eq, V> {
    entries: RwLock<LruCache<K, Entry<V>>>,
}

impl<K, V> TtlLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = rw_write(&self.entries, SOURCE, "get");
        let expired = match entries.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    /// Inserts or replaces `key`. Returns the key evicted to make room, if any.
    pub fn set(&self, key: K, value: V, ttl: Duration) -> Option<K> {
        let now = Instant::now();
        let entry = Entry {
            value,
            expires_at: now + ttl,
        };
        let mut entries = rw_write(&self.entries, SOURCE, "set");

        if entries.len() == entries.cap().get() && !entries.contains(&key) {
            purge_expired(&mut entries, now);
        }

        match entries.push(key.clone(), entry) {
            Some((previous, _)) if previous != key => Some(previous),
            _ => None,
        }
    }

    /// Removing an absent key is a no-op. Returns whether an entry was dropped.
    pub fn remove(&self, key: &K) -> bool {
        rw_write(&self.entries, SOURCE, "remove").pop(key).is_some()
    }

    /// Does not refresh the entry's recency.
    pub fn contains(&self, key: &K) -> bool {
        let now = Instant::now();
        rw_read(&self.entries, SOURCE, "contains")
            .peek(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        rw_read(&self.entries, SOURCE, "len")
            .iter()
            .filter(|(_, entry)| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

}

fn purge_expired<K, V>(entries: &mut LruCache<K, Entry<V>>, now: Instant)
where
    K: Hash + Eq + Clone,
{
    let expired: Vec<K> = entries
        .iter()
        .filter(|(_, entry)| !entry.is_live(now))
        .map(|(key, _)| key.clone())
        .collect();
    for key in expired {
        entries.pop(&key);
    }
}

//! Per-owner post list cache used by the post service.

use std::time::Duration;

use metrics::counter;
use tracing::debug;

use crate::domain::entities::PostRecord;
use crate::domain::types::UserId;

use super::config::CacheConfig;
use super::store::TtlLruCache;

pub const METRIC_POST_CACHE_HIT: &str = "tidepost_post_cache_hit_total";
pub const METRIC_POST_CACHE_MISS: &str = "tidepost_post_cache_miss_total";
pub const METRIC_POST_CACHE_EVICT: &str = "tidepost_post_cache_evict_total";

/// Snapshot of each owner's post list, newest first.
///
/// Writers never edit a cached list; they drop it with [`PostListCache::invalidate`]
/// and the next reader recomputes it from the store.
pub struct PostListCache {
    enabled: bool,
    ttl: Duration,
    lists: TtlLruCache<UserId, Vec<PostRecord>>,
}

impl PostListCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ttl: config.ttl(),
            lists: TtlLruCache::new(config.capacity_non_zero()),
        }
    }

    pub fn get(&self, owner: UserId) -> Option<Vec<PostRecord>> {
        if !self.enabled {
            return None;
        }
        match self.lists.get(&owner) {
            Some(posts) => {
                counter!(METRIC_POST_CACHE_HIT).increment(1);
                Some(posts)
            }
            None => {
                counter!(METRIC_POST_CACHE_MISS).increment(1);
                None
            }
        }
    }

    pub fn store(&self, owner: UserId, posts: Vec<PostRecord>) {
        if !self.enabled {
            return;
        }
        if let Some(evicted) = self.lists.set(owner, posts, self.ttl) {
            counter!(METRIC_POST_CACHE_EVICT).increment(1);
            debug!(
                target = "tidepost::cache",
                evicted_owner = evicted,
                "post list evicted to make room"
            );
        }
    }

    /// Safe to call for owners without a cached list.
    pub fn invalidate(&self, owner: UserId) {
        self.lists.remove(&owner);
    }

    pub fn contains(&self, owner: UserId) -> bool {
        self.enabled && self.lists.contains(&owner)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

//! In-process caching for tidepost.
//!
//! [`TtlLruCache`] is the generic keyed store (per-entry expiry plus LRU
//! capacity bound); [`PostListCache`] applies it to each owner's post list.
//!
//! ```toml
//! [cache]
//! enabled = true
//! ttl_seconds = 300
//! capacity = 100
//! ```

mod config;
mod lock;
mod posts;
mod store;

pub use config::CacheConfig;
pub use posts::{
    METRIC_POST_CACHE_EVICT, METRIC_POST_CACHE_HIT, METRIC_POST_CACHE_MISS, PostListCache,
};
pub use store::TtlLruCache;

//! Cache for exhausted slugs.
//!
//! Once both allotments of a record are spent its destination never changes
//! again, so it can be served without a storage round trip. That only holds
//! while records cannot be replaced: under the `replace` duplicate policy the
//! registry runs without a cache. Records with counters left are never cached.
//!
//! - [`RedisCache`] - Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;

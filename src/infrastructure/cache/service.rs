//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of fallback destinations for exhausted slugs.
///
/// Implementations must be thread-safe and fail open: a broken cache
/// degrades to storage lookups, it never fails a request.
///
/// An entry is only correct while exhaustion is terminal, so the registry
/// never uses a cache when records can be replaced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached fallback destination for `slug`, if any.
    async fn get_fallback(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores the fallback destination of an exhausted slug.
    ///
    /// `ttl_seconds = None` uses the implementation default.
    async fn set_fallback(
        &self,
        slug: &str,
        destination: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reports.
    fn backend(&self) -> &'static str;
}

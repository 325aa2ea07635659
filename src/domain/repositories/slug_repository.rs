//! Repository trait for slug record storage.

use crate::domain::entities::{NewSlugRecord, Serve, SlugRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for slug records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSlugRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemorySlugRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug already exists.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError>;

    /// Inserts a record, replacing any existing one with the same slug.
    ///
    /// A replaced record gets fresh counters and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn upsert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError>;

    /// Finds a record without touching its counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError>;

    /// Serves one hit for `slug`.
    ///
    /// Reads the record, applies [`SlugRecord::serve`] and persists the
    /// decremented counter as one atomic step per slug, so concurrent callers
    /// never both spend the same unit of an allotment.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Serve))` with the chosen destination
    /// - `Ok(None)` if no record exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn take_serve(&self, slug: &str) -> Result<Option<Serve>, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}

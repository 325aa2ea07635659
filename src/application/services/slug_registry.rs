//! Slug creation and resolution service.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderValue;
use serde_json::json;
use tracing::{debug, error, info};
use validator::{Validate, ValidationError};

use crate::domain::entities::{NewSlugRecord, Route, Serve, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, NullCache};
use crate::utils::slug_generator::SlugGenerator;

/// What `create` does when the derived slug already has a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`AppError::Conflict`]; the existing record is untouched.
    #[default]
    Reject,
    /// Overwrite the existing record, resetting its counters.
    Replace,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => f.write_str("reject"),
            DuplicatePolicy::Replace => f.write_str("replace"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("duplicate policy must be 'reject' or 'replace', got '{0}'")]
pub struct InvalidDuplicatePolicy(String);

impl FromStr for DuplicatePolicy {
    type Err = InvalidDuplicatePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "replace" => Ok(DuplicatePolicy::Replace),
            other => Err(InvalidDuplicatePolicy(other.to_string())),
        }
    }
}

/// Request to shorten a URL, as received from a caller.
///
/// Counters are wide and signed here; [`SlugRegistry::create`] clamps them
/// into the stored range.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateSlug {
    #[validate(
        length(min = 1, message = "Primary URL is required"),
        url(message = "Invalid URL format"),
        custom(function = "validate_redirect_target")
    )]
    pub primary_url: String,
    #[validate(
        url(message = "Invalid URL format"),
        custom(function = "validate_redirect_target")
    )]
    pub secondary_url: Option<String>,
    pub primary_remaining: i64,
    pub secondary_remaining: i64,
}

impl CreateSlug {
    /// Creates a request that always resolves to `primary_url`.
    pub fn primary_only(primary_url: impl Into<String>) -> Self {
        Self {
            primary_url: primary_url.into(),
            ..Self::default()
        }
    }

    fn normalized(self) -> Self {
        let secondary_url = self
            .secondary_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        // No secondary destination means no secondary allotment.
        let secondary_remaining = if secondary_url.is_some() {
            self.secondary_remaining
        } else {
            0
        };

        Self {
            primary_url: self.primary_url.trim().to_string(),
            secondary_url,
            primary_remaining: self.primary_remaining,
            secondary_remaining,
        }
    }
}

/// Rejects URLs that cannot be sent back in a `Location` header.
///
/// URL parsing silently drops tabs and newlines, so a URL can pass the
/// `url` check and still fail when the redirect is built.
fn validate_redirect_target(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_err() {
        return Err(ValidationError::new("redirect_target")
            .with_message("URL contains characters not allowed in a redirect".into()));
    }
    Ok(())
}

fn clamp_counter(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}

/// Service owning slug creation and the serve-counter policy.
///
/// Storage and cache are injected, so the same registry runs over
/// PostgreSQL, the in-memory store, or mocks. Under
/// [`DuplicatePolicy::Replace`] the given cache is dropped: a replaced record
/// gets fresh counters, so exhaustion is no longer terminal.
pub struct SlugRegistry {
    repository: Arc<dyn SlugRepository>,
    cache: Arc<dyn CacheService>,
    generator: SlugGenerator,
    duplicate_policy: DuplicatePolicy,
}

impl SlugRegistry {
    pub fn new(
        repository: Arc<dyn SlugRepository>,
        cache: Arc<dyn CacheService>,
        generator: SlugGenerator,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        let cache: Arc<dyn CacheService> = match duplicate_policy {
            DuplicatePolicy::Reject => cache,
            DuplicatePolicy::Replace => {
                info!("Fallback cache disabled under the replace duplicate policy");
                Arc::new(NullCache::new())
            }
        };

        Self {
            repository,
            cache,
            generator,
            duplicate_policy,
        }
    }

    pub fn generator(&self) -> &SlugGenerator {
        &self.generator
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Creates a record for `request.primary_url` and returns it.
    ///
    /// The slug is derived from the trimmed primary URL. Negative counters
    /// are clamped to zero, and a missing secondary URL zeroes the secondary
    /// allotment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the primary URL is empty, or if
    /// either URL is malformed or cannot be used as a redirect target.
    /// Returns [`AppError::Conflict`] if the slug exists and the policy is
    /// [`DuplicatePolicy::Reject`].
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn create(&self, request: CreateSlug) -> Result<SlugRecord, AppError> {
        let request = request.normalized();
        request.validate()?;

        let new_record = NewSlugRecord {
            slug: self.generator.generate(&request.primary_url),
            primary_url: request.primary_url,
            secondary_url: request.secondary_url,
            primary_remaining: clamp_counter(request.primary_remaining),
            secondary_remaining: clamp_counter(request.secondary_remaining),
        };

        let record = match self.duplicate_policy {
            DuplicatePolicy::Reject => self.repository.insert(new_record).await?,
            DuplicatePolicy::Replace => self.repository.upsert(new_record).await?,
        };

        info!(
            slug = %record.slug,
            primary_remaining = record.primary_remaining,
            secondary_remaining = record.secondary_remaining,
            "Slug created"
        );

        Ok(record)
    }

    /// Serves one hit for `slug` and returns the chosen destination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists.
    /// Returns [`AppError::Persistence`] on storage errors.
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        self.serve(slug).await.map(|serve| serve.destination)
    }

    /// Serves one hit for `slug`, reporting which allotment paid for it.
    ///
    /// Exhausted slugs are answered from the cache when possible; otherwise
    /// the repository applies the policy atomically and an exhausted result
    /// is cached for later hits.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn serve(&self, slug: &str) -> Result<Serve, AppError> {
        match self.cache.get_fallback(slug).await {
            Ok(Some(destination)) => {
                debug!("Cache HIT for {}", slug);
                return Ok(Serve {
                    route: Route::Fallback,
                    destination,
                });
            }
            Ok(None) => debug!("Cache MISS for {}", slug),
            Err(e) => error!("Cache error: {}", e),
        }

        let serve = self
            .repository
            .take_serve(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Slug not found", json!({ "slug": slug })))?;

        debug!(slug, route = serve.route.as_str(), "Resolved slug");

        if serve.route == Route::Fallback
            && let Err(e) = self.cache.set_fallback(slug, &serve.destination, None).await
        {
            error!("Failed to cache fallback for {}: {}", slug, e);
        }

        Ok(serve)
    }

    /// Returns the stored record without serving it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists.
    pub async fn get(&self, slug: &str) -> Result<SlugRecord, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Slug not found", json!({ "slug": slug })))
    }

    /// Checks storage connectivity.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Checks cache connectivity.
    pub async fn check_cache(&self) -> bool {
        self.cache.health_check().await
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }
}

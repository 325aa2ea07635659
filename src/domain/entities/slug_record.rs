//! Slug record entity and the serve-counter policy.

use chrono::{DateTime, Months, Utc};

/// How long a record nominally lives. Persisted only; never enforced.
pub const DEFAULT_LIFETIME_MONTHS: u32 = 120;

/// A shortened URL with its split-testing counters.
///
/// `primary_remaining` serves go to `primary_url`, then `secondary_remaining`
/// serves go to `secondary_url`, then every request falls back to
/// `primary_url` forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugRecord {
    pub slug: String,
    pub primary_url: String,
    pub secondary_url: Option<String>,
    pub primary_remaining: i32,
    pub secondary_remaining: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Which allotment a resolution was charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Served from the primary allotment; `primary_remaining` was decremented.
    Primary,
    /// Served from the secondary allotment; `secondary_remaining` was decremented.
    Secondary,
    /// Both allotments exhausted; served the primary URL without mutation.
    Fallback,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Primary => "primary",
            Route::Secondary => "secondary",
            Route::Fallback => "fallback",
        }
    }

    /// Returns true when serving this route changed the counters.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Route::Fallback)
    }
}

/// Outcome of a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serve {
    pub route: Route,
    pub destination: String,
}

impl SlugRecord {
    /// Builds a freshly created record, stamping the timestamps the store
    /// would default.
    pub fn from_new(new: NewSlugRecord, now: DateTime<Utc>) -> Self {
        let expires_at = now
            .checked_add_months(Months::new(DEFAULT_LIFETIME_MONTHS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            slug: new.slug,
            primary_url: new.primary_url,
            secondary_url: new.secondary_url,
            primary_remaining: new.primary_remaining,
            secondary_remaining: new.secondary_remaining,
            created_at: now,
            expires_at,
        }
    }

    /// Returns true once both allotments are spent.
    ///
    /// An exhausted record only changes again if it is re-created.
    pub fn is_exhausted(&self) -> bool {
        self.primary_remaining <= 0 && !self.has_secondary_allotment()
    }

    fn has_secondary_allotment(&self) -> bool {
        self.secondary_remaining > 0 && self.secondary_url.is_some()
    }

    /// Picks the destination for one hit and charges the matching counter.
    ///
    /// The caller is responsible for persisting the counters when
    /// [`Route::is_mutating`] is true, under the same lock it read them with.
    pub fn serve(&mut self) -> Serve {
        if self.primary_remaining > 0 {
            self.primary_remaining -= 1;
            return Serve {
                route: Route::Primary,
                destination: self.primary_url.clone(),
            };
        }

        if self.has_secondary_allotment()
            && let Some(secondary) = &self.secondary_url
        {
            self.secondary_remaining -= 1;
            return Serve {
                route: Route::Secondary,
                destination: secondary.clone(),
            };
        }

        Serve {
            route: Route::Fallback,
            destination: self.primary_url.clone(),
        }
    }
}

/// Input data for creating (or replacing) a record.
///
/// Built by the registry, which has already derived the slug and
/// normalised the counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlugRecord {
    pub slug: String,
    pub primary_url: String,
    pub secondary_url: Option<String>,
    pub primary_remaining: i32,
    pub secondary_remaining: i32,
}

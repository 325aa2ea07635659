//! Handler for slug creation.

use axum::{Form, Json, extract::State};

use crate::api::dto::new_slug::{NewSlugForm, SlugResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a slug for the submitted primary URL.
///
/// # Endpoint
///
/// `POST /new` (`application/x-www-form-urlencoded`)
///
/// # Form Fields
///
/// - `gurl` or `url` - primary destination (required)
/// - `burl` - secondary destination
/// - `gcount` - serves sent to the primary destination first
/// - `bcount` - serves sent to the secondary destination next
///
/// # Response
///
/// ```json
/// { "slug": "100680ad" }
/// ```
///
/// # Errors
///
/// - 400 if no primary URL was given
/// - 409 if the slug exists and duplicates are rejected
/// - 500 on storage errors
pub async fn new_slug_handler(
    State(state): State<AppState>,
    Form(form): Form<NewSlugForm>,
) -> Result<Json<SlugResponse>, AppError> {
    let record = state.registry.create(form.into()).await?;

    Ok(Json(SlugResponse { slug: record.slug }))
}

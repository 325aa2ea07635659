//! Handler for slug resolution.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to the destination chosen by its counters.
///
/// # Endpoint
///
/// `GET /r/{slug}`
///
/// Each call spends one unit of the primary allotment, then of the
/// secondary allotment; once both are spent every call goes to the primary
/// destination. Always answers with 307 Temporary Redirect so clients do
/// not cache a destination that may change on the next hit.
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist.
/// Returns 500 on storage errors or an unusable stored destination.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let destination = state.registry.resolve(&slug).await?;

    // Stored rows are not guaranteed to have passed create-time validation.
    if HeaderValue::from_str(&destination).is_err() {
        return Err(AppError::persistence(
            "Stored destination is not a valid redirect target",
            json!({ "slug": slug }),
        ));
    }

    Ok(Redirect::temporary(&destination))
}

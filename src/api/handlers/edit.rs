//! Handler for the edit endpoint.

use axum::{Json, extract::Path};

use crate::api::dto::new_slug::SlugResponse;

/// Echoes the slug back without modifying anything.
///
/// # Endpoint
///
/// `PUT /edit/{slug}`
///
/// Records are immutable apart from resolution; this route only reserves
/// the path.
pub async fn edit_handler(Path(slug): Path<String>) -> Json<SlugResponse> {
    Json(SlugResponse { slug })
}

//! API route configuration.

use crate::api::handlers::{edit_handler, new_slug_handler, redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Slug endpoints.
///
/// # Endpoints
///
/// - `POST /new`          - Create a slug from form fields
/// - `GET  /r/{slug}`     - Resolve a slug and redirect
/// - `PUT  /edit/{slug}`  - Placeholder that echoes the slug
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/new", post(new_slug_handler))
        .route("/r/{slug}", get(redirect_handler))
        .route("/edit/{slug}", put(edit_handler))
}

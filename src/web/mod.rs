//! Browser-facing pages.
//!
//! Server-side rendered with Askama templates from `templates/`.

pub mod handlers;
pub mod routes;

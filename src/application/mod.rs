//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::slug_registry::SlugRegistry`] - Slug creation and resolution

pub mod services;

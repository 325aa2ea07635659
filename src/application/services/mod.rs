//! Business logic services for the application layer.

pub mod slug_registry;

pub use slug_registry::{CreateSlug, DuplicatePolicy, SlugRegistry};

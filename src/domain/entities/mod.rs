//! Core domain entities.
//!
//! Entities are plain data structures; the one piece of behaviour that lives
//! here is the serve policy on [`SlugRecord`], because it is the invariant
//! every storage backend must apply identically.
//!
//! - [`SlugRecord`] - A stored slug with its destinations and counters
//! - [`NewSlugRecord`] - Input for creating or replacing a record
//! - [`Serve`] / [`Route`] - The outcome of one resolution

pub mod slug_record;

pub use slug_record::{NewSlugRecord, Route, Serve, SlugRecord};

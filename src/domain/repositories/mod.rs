//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_slug.rs` for usage examples.

pub mod slug_repository;

pub use slug_repository::SlugRepository;

#[cfg(test)]
pub use slug_repository::MockSlugRepository;

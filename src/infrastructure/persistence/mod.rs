//! Slug repository implementations.
//!
//! # Repositories
//!
//! - [`PgSlugRepository`] - PostgreSQL storage via SQLx
//! - [`MemorySlugRepository`] - In-process storage for development and tests

pub mod memory_slug_repository;
pub mod pg_slug_repository;

pub use memory_slug_repository::MemorySlugRepository;
pub use pg_slug_repository::PgSlugRepository;

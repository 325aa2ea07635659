//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures and the serve policy
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives `GET /r/{slug}`
//! 2. [`crate::application::services::SlugRegistry::resolve`] checks the cache
//! 3. On a miss, [`repositories::SlugRepository::take_serve`] locks the record,
//!    applies [`entities::SlugRecord::serve`] and persists the counters
//! 4. The handler answers with a temporary redirect

pub mod entities;
pub mod repositories;

//! Utility functions shared across layers.
//!
//! - [`slug_generator`] - Deterministic slug derivation
//! - [`db_error`] - Classification of database errors

pub mod db_error;
pub mod slug_generator;

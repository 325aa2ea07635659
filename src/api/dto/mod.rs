//! Data Transfer Objects for requests and responses.

pub mod health;
pub mod new_slug;

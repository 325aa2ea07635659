//! HTTP API layer.
//!
//! Translates HTTP requests into registry operations and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Form and JSON payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

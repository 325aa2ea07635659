//! HTML template rendering handlers.

mod index;

pub use index::index_handler;

//! HTTP request handlers for API endpoints.

pub mod edit;
pub mod health;
pub mod new_slug;
pub mod redirect;

pub use edit::edit_handler;
pub use health::health_handler;
pub use new_slug::new_slug_handler;
pub use redirect::redirect_handler;

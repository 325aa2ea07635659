use std::sync::Arc;

use crate::application::services::SlugRegistry;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SlugRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<SlugRegistry>) -> Self {
        Self { registry }
    }
}

//! Shared application state for all routes. The store is injected, never global.

use crate::settings::DEFAULT_MAX_BODY_BYTES;
use crate::store::MovieStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
    /// Largest request body the movie handlers will buffer.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        AppState {
            store,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

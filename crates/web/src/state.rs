//! Application state for dependency injection.

use std::sync::Arc;

use person_service_lib::PersonDirectory;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<PersonDirectory>,
}

impl AppState {
    /// Create new app state.
    pub fn new(directory: Arc<PersonDirectory>) -> Self {
        Self { directory }
    }
}

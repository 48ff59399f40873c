//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PostRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store handle, created once at startup and shared by every request
    pub repository: Arc<dyn PostRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }
}

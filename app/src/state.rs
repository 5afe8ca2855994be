//! Application state for the hxtodo HTTP server.

use hxtodo_core::TodoRepository;

/// Application state shared across all HTTP handlers.
///
/// Built once at startup around the configured record store and cloned
/// (cheaply, through `Arc`s) for each request.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Data access for todos
    pub repo: TodoRepository,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(repo: TodoRepository) -> Self {
        Self { repo }
    }
}

//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::api::SpaceTravelApi;
use crate::render::Templates;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Client for the remote Space Travel service
    pub api: Arc<dyn SpaceTravelApi>,

    /// Compiled page templates
    pub templates: Templates,
}

impl AppState {
    pub fn new(api: Arc<dyn SpaceTravelApi>, templates: Templates) -> Self {
        Self { api, templates }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;

use std::sync::Arc;

use crate::assessment::suggestions::ModelSettings;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the HTTP client could not be built; every request then runs offline.
    pub completion: Option<Arc<dyn CompletionClient>>,
    pub model: ModelSettings,
}

//! Application State

use std::sync::Arc;

use chat_core::ReplyProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream reply provider (Azure OpenAI in production)
    pub provider: Arc<dyn ReplyProvider>,
}

impl AppState {
    /// Create application state around a provider
    pub fn new(provider: Arc<dyn ReplyProvider>) -> Self {
        Self { provider }
    }
}

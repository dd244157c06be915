use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text-generation backend. Production: `GeminiClient`.
    /// Tests swap in a scripted fake without touching handler code.
    pub llm: Arc<dyn TextGenerator>,
    #[allow(dead_code)]
    pub config: Config,
}

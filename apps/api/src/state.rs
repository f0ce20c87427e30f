use std::sync::Arc;

use crate::agents::AgentCatalog;
use crate::config::Config;
use crate::generation::orchestrator::ContentOrchestrator;
use crate::layout::LayoutEngine;
use crate::llm_client::ModelClient;
use crate::storage::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup.
    pub catalog: Arc<AgentCatalog>,
    pub orchestrator: ContentOrchestrator,
    /// Rendering is synchronous; handlers move a clone into `spawn_blocking`.
    pub layout: Arc<LayoutEngine>,
    pub store: Arc<dyn DocumentStore>,
    /// Same client the orchestrator uses; kept here for the health probe.
    pub model: Arc<dyn ModelClient>,
}

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus reachability of the model endpoint. An unreachable model does
/// not make the service unhealthy: generation still degrades to record-only content.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model_reachable = state.model.health().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "docgen-api",
        "model": {
            "name": state.model.model_name(),
            "endpoint": state.config.ollama_base_url,
            "reachable": model_reachable
        },
        "storage": state.store.describe(),
        "fonts": {
            "family": state.layout.fonts().family,
            "degraded": state.layout.fonts().is_degraded()
        }
    }))
}

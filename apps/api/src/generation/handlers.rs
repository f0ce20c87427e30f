//! Axum route handlers for the document API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::agents::AgentSummary;
use crate::errors::AppError;
use crate::generation::orchestrator::check_eligibility;
use crate::layout::LayoutWarning;
use crate::models::{DocumentType, GenerationRequest, RenderableContent};
use crate::state::AppState;
use crate::storage::document_filename;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub request_id: Uuid,
    pub document_type: DocumentType,
    pub filename: String,
    pub location: String,
    pub page_count: usize,
    pub warnings: Vec<LayoutWarning>,
    pub content: RenderableContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPreviewResponse {
    pub document_type: DocumentType,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentSummary>,
}

fn validate(request: &GenerationRequest) -> Result<(), AppError> {
    if request.subject.first_name.trim().is_empty() || request.subject.last_name.trim().is_empty()
    {
        return Err(AppError::Validation(
            "subject.firstName and subject.lastName cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Full pipeline: eligibility → (model → extract) → merge → render → store.
/// Model failures degrade to record-only content; they never fail the request.
pub async fn handle_create_document(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, AppError> {
    let Json(request) = payload?;
    validate(&request)?;

    let request_id = Uuid::new_v4();
    let document_type = request.document_type;
    info!(
        "[{request_id}] Generating {document_type} for {}",
        request.subject.full_name()
    );

    let content = state.orchestrator.produce(&request).await?;

    let layout = state.layout.clone();
    let to_render = content.clone();
    let rendered = tokio::task::spawn_blocking(move || layout.render(document_type, &to_render))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    let filename = document_filename(
        document_type,
        &content.last_name,
        &content.first_name,
        Utc::now().timestamp_millis(),
    );
    let stored = state
        .store
        .put(&filename, Bytes::from(rendered.bytes))
        .await?;

    info!(
        "[{request_id}] Stored {} ({} page(s), {} warning(s))",
        stored.location,
        rendered.page_count,
        rendered.warnings.len()
    );

    Ok(Json(DocumentResponse {
        request_id,
        document_type,
        filename: stored.filename,
        location: stored.location,
        page_count: rendered.page_count,
        warnings: rendered.warnings,
        content,
    }))
}

/// POST /api/v1/prompts/preview
///
/// Returns the prompt that would be sent to the model, without calling it.
pub async fn handle_preview_prompt(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let Json(request) = payload?;
    validate(&request)?;
    check_eligibility(request.document_type, &request.subject)?;

    Ok(Json(PromptPreviewResponse {
        document_type: request.document_type,
        prompt: state.orchestrator.prompt_for(&request),
    }))
}

/// GET /api/v1/agents
pub async fn handle_list_agents(State(state): State<AppState>) -> Json<AgentListResponse> {
    Json(AgentListResponse {
        agents: state.catalog.summaries(),
    })
}

//! Per-request sequencing of the content pipeline.
//!
//! validate → (skip if no notes) → prompt → model → extract → merge.
//! Only eligibility failures escape; every model or extraction failure is logged
//! and downgraded to record-only content.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::agents::AgentCatalog;
use crate::generation::extractor::extract;
use crate::generation::prompt_builder::build_prompt;
use crate::generation::prompts::output_format;
use crate::generation::team_context::TeamDirectory;
use crate::llm_client::ModelClient;
use crate::models::{DocumentType, GenerationRequest, RenderableContent, SubjectRecord};

/// Role vocabulary accepted for internship evaluations (case-insensitive substring).
pub const INTERN_ROLE_MARKERS: &[&str] = &["praktykant", "stażysta", "staż", "intern", "trainee"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("role '{role}' is not eligible for an internship evaluation")]
    RoleNotEligible { role: String },
}

/// Per-type subject validation. Runs before any I/O.
pub fn check_eligibility(
    document_type: DocumentType,
    subject: &SubjectRecord,
) -> Result<(), GenerationError> {
    match document_type {
        DocumentType::References | DocumentType::Certificate => Ok(()),
        DocumentType::Internship => {
            let role = subject.role.to_lowercase();
            if INTERN_ROLE_MARKERS.iter().any(|m| role.contains(m)) {
                Ok(())
            } else {
                Err(GenerationError::RoleNotEligible {
                    role: subject.role.clone(),
                })
            }
        }
    }
}

#[derive(Clone)]
pub struct ContentOrchestrator {
    catalog: Arc<AgentCatalog>,
    teams: Arc<TeamDirectory>,
    model: Arc<dyn ModelClient>,
}

impl ContentOrchestrator {
    pub fn new(
        catalog: Arc<AgentCatalog>,
        teams: Arc<TeamDirectory>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            catalog,
            teams,
            model,
        }
    }

    /// The exact prompt `produce` would send for `request`.
    pub fn prompt_for(&self, request: &GenerationRequest) -> String {
        let document_type = request.document_type;
        build_prompt(
            self.catalog.template(document_type),
            &request.subject,
            &request.operator_notes,
            &self.teams.describe(&request.subject.team),
            &output_format(document_type),
        )
    }

    pub async fn produce(
        &self,
        request: &GenerationRequest,
    ) -> Result<RenderableContent, GenerationError> {
        let document_type = request.document_type;
        let subject = &request.subject;

        check_eligibility(document_type, subject)?;

        if !request.has_operator_notes() {
            info!(
                "No operator notes for {} ({document_type}), skipping model",
                subject.full_name()
            );
            return Ok(RenderableContent::record_only(document_type, subject));
        }

        let prompt = self.prompt_for(request);

        let raw = match self.model.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Model call failed for {} ({document_type}), using record data only: {e}",
                    subject.full_name()
                );
                return Ok(RenderableContent::record_only(document_type, subject));
            }
        };

        let recovered = match extract(&raw) {
            Ok(recovered) => recovered,
            Err(e) => {
                warn!(
                    "Could not recover fields for {} ({document_type}), using record data only: {e}",
                    subject.full_name()
                );
                return Ok(RenderableContent::record_only(document_type, subject));
            }
        };

        let content = RenderableContent::merge(document_type, subject, Some(&recovered));
        if content.fields.all_empty() {
            warn!(
                "Model returned no usable {} fields for {}",
                document_type,
                subject.full_name()
            );
        } else {
            info!(
                "Recovered {} field(s) for {} ({document_type})",
                recovered.len(),
                subject.full_name()
            );
        }
        Ok(content)
    }
}

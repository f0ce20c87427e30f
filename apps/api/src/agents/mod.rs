//! Agent catalog: one persona template per document type.
//!
//! Templates are immutable data built once in `main` and shared through `Arc`.
//! Lookup by wire id never fails: unknown ids fall back to the references agent.

pub mod templates;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::DocumentType;

/// What a worked example is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedOutput {
    /// Free prose, inserted verbatim into the prompt.
    Prose(&'static str),
    /// Field-by-field structured output, dumped as an indented object.
    Structured(&'static [(&'static str, &'static str)]),
}

/// Context tags describing the person in a worked example.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExampleTags {
    pub gender: Option<&'static str>,
    pub status: Option<&'static str>,
    pub team: Option<&'static str>,
    pub role: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentExample {
    pub description: &'static str,
    pub tags: ExampleTags,
    pub output: ExpectedOutput,
}

/// Persona, guidelines, worked examples and structure template for one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTemplate {
    pub document_type: DocumentType,
    pub name: &'static str,
    pub personality: &'static str,
    pub guidelines: &'static [&'static str],
    pub key_phrases: &'static [&'static str],
    pub examples: &'static [AgentExample],
    pub structure_template: &'static str,
}

/// Summary used by the catalog listing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub guidelines: usize,
    pub key_phrases: usize,
    pub examples: usize,
}

#[derive(Debug, Clone)]
pub struct AgentCatalog {
    references: AgentTemplate,
    certificate: AgentTemplate,
    internship: AgentTemplate,
}

impl AgentCatalog {
    /// The built-in Polish-language agents.
    pub fn builtin() -> Self {
        Self {
            references: templates::references_agent(),
            certificate: templates::certificate_agent(),
            internship: templates::internship_agent(),
        }
    }

    /// Typed lookup. Exhaustive over `DocumentType`.
    pub fn template(&self, document_type: DocumentType) -> &AgentTemplate {
        match document_type {
            DocumentType::References => &self.references,
            DocumentType::Certificate => &self.certificate,
            DocumentType::Internship => &self.internship,
        }
    }

    /// Lookup by wire id. Unknown ids log a warning and return the references agent.
    pub fn get_template(&self, document_type_id: &str) -> &AgentTemplate {
        match DocumentType::parse(document_type_id) {
            Some(document_type) => {
                let template = self.template(document_type);
                debug!(
                    "Selected agent '{}' for document type '{}'",
                    template.name, document_type_id
                );
                template
            }
            None => {
                warn!(
                    "No agent for document type '{}', falling back to references agent",
                    document_type_id
                );
                &self.references
            }
        }
    }

    pub fn summaries(&self) -> Vec<AgentSummary> {
        DocumentType::ALL
            .iter()
            .map(|t| {
                let template = self.template(*t);
                AgentSummary {
                    id: t.id(),
                    name: template.name,
                    guidelines: template.guidelines.len(),
                    key_phrases: template.key_phrases.len(),
                    examples: template.examples.len(),
                }
            })
            .collect()
    }
}

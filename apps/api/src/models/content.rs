//! Content handed from the orchestrator to the layout engine.
//!
//! `RenderableContent::merge` is the only place where record data, recovered model
//! fields and defaults meet. Every field leaves it as a plain `String`; absence is `""`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::subject::{DocumentType, SubjectRecord};

/// Best-effort key → string mapping recovered from a raw model response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveredFields(BTreeMap<String, String>);

impl RecoveredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value under the first-non-empty-wins policy.
    ///
    /// The first occurrence of a key is always stored. A later occurrence replaces the
    /// stored value only when the stored value is empty and the new one is not.
    pub fn offer(&mut self, key: &str, value: String) {
        match self.0.get_mut(key) {
            Some(stored) => {
                if stored.is_empty() && !value.is_empty() {
                    *stored = value;
                }
            }
            None => {
                self.0.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or `""` when the model did not return it.
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Model-sourced fields, one variant per document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "documentType", rename_all = "camelCase")]
pub enum DocumentFields {
    #[serde(rename = "references", rename_all = "camelCase")]
    References { reference_text: String },
    #[serde(rename = "cert", rename_all = "camelCase")]
    Certificate { additional_description: String },
    #[serde(rename = "internship", rename_all = "camelCase")]
    Internship {
        main_tasks: String,
        internship_description: String,
        general_information: String,
        evaluation: String,
        grade: String,
    },
}

impl DocumentFields {
    /// Builds the variant for `document_type`, pulling each field from `recovered`.
    fn from_recovered(document_type: DocumentType, recovered: &RecoveredFields) -> Self {
        match document_type {
            DocumentType::References => Self::References {
                reference_text: recovered.get_or_empty("referenceText"),
            },
            DocumentType::Certificate => Self::Certificate {
                additional_description: recovered.get_or_empty("additionalDescription"),
            },
            DocumentType::Internship => Self::Internship {
                main_tasks: recovered.get_or_empty("mainTasks"),
                internship_description: recovered.get_or_empty("internshipDescription"),
                general_information: recovered.get_or_empty("generalInformation"),
                evaluation: recovered.get_or_empty("evaluation"),
                grade: recovered.get_or_empty("grade"),
            },
        }
    }

    /// `(field name, value)` pairs in schema order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::References { reference_text } => vec![("referenceText", reference_text.as_str())],
            Self::Certificate {
                additional_description,
            } => vec![("additionalDescription", additional_description.as_str())],
            Self::Internship {
                main_tasks,
                internship_description,
                general_information,
                evaluation,
                grade,
            } => vec![
                ("mainTasks", main_tasks.as_str()),
                ("internshipDescription", internship_description.as_str()),
                ("generalInformation", general_information.as_str()),
                ("evaluation", evaluation.as_str()),
                ("grade", grade.as_str()),
            ],
        }
    }

    pub fn all_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_empty())
    }
}

/// The single object the layout engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableContent {
    pub first_name: String,
    pub last_name: String,
    pub team: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub role: String,
    pub main_tasks: String,
    pub gender: String,
    pub fields: DocumentFields,
}

impl RenderableContent {
    /// Merges the subject record with (optionally) recovered model fields.
    ///
    /// `recovered = None` yields record-only content with every model-sourced field `""`.
    /// For internships a non-empty recovered `mainTasks` replaces the record's tasks.
    pub fn merge(
        document_type: DocumentType,
        subject: &SubjectRecord,
        recovered: Option<&RecoveredFields>,
    ) -> Self {
        let empty = RecoveredFields::new();
        let fields = DocumentFields::from_recovered(document_type, recovered.unwrap_or(&empty));

        let main_tasks = match &fields {
            DocumentFields::Internship { main_tasks, .. } if !main_tasks.trim().is_empty() => {
                main_tasks.clone()
            }
            _ => subject.main_tasks.clone(),
        };

        Self {
            first_name: subject.first_name.clone(),
            last_name: subject.last_name.clone(),
            team: subject.team.clone(),
            start_date: subject.start_date.clone(),
            end_date: subject.end_date.clone(),
            status: subject.status_text().to_string(),
            role: subject.role.clone(),
            main_tasks,
            gender: subject.gender.clone().unwrap_or_default(),
            fields,
        }
    }

    /// Record-only content: the fallback used when the model is skipped or fails.
    pub fn record_only(document_type: DocumentType, subject: &SubjectRecord) -> Self {
        Self::merge(document_type, subject, None)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

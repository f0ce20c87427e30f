use std::fmt;

use serde::{Deserialize, Serialize};

/// Default end date for records whose collaboration is still ongoing.
pub const OPEN_END_DATE: &str = "do dnia dzisiejszego";

// ────────────────────────────────────────────────────────────────────────────
// Document type
// ────────────────────────────────────────────────────────────────────────────

/// The three document kinds the pipeline can produce.
///
/// Every per-type decision (agent template, recovered field schema, output format,
/// eligibility rule, filename prefix, title) hangs off this enum so that adding a
/// variant is checked exhaustively at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "references")]
    References,
    #[serde(rename = "cert", alias = "certificate")]
    Certificate,
    #[serde(rename = "internship", alias = "praktyka")]
    Internship,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::References,
        DocumentType::Certificate,
        DocumentType::Internship,
    ];

    /// Parses a wire id (case-insensitive), including the legacy aliases.
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "references" => Some(Self::References),
            "cert" | "certificate" => Some(Self::Certificate),
            "internship" | "praktyka" => Some(Self::Internship),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::References => "references",
            Self::Certificate => "cert",
            Self::Internship => "internship",
        }
    }

    /// Field names the model is asked to return for this document type.
    pub fn recovered_field_names(&self) -> &'static [&'static str] {
        match self {
            Self::References => &["referenceText"],
            Self::Certificate => &["additionalDescription"],
            Self::Internship => &[
                "mainTasks",
                "internshipDescription",
                "generalInformation",
                "evaluation",
                "grade",
            ],
        }
    }

    /// Prefix of the generated filename.
    pub fn filename_prefix(&self) -> &'static str {
        match self {
            Self::References => "referencje",
            Self::Certificate => "certyfikat",
            Self::Internship => "staz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::References => "REFERENCJE",
            Self::Certificate => "ZAŚWIADCZENIE",
            Self::Internship => "OCENA STAŻU / PRAKTYKI",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Subject record
// ────────────────────────────────────────────────────────────────────────────

/// Grammatical gender used for verb agreement hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Accepts the record codes `K`/`F` and `M` plus the spelled-out words.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "k" | "f" | "kobieta" | "female" => Some(Self::Female),
            "m" | "mężczyzna" | "male" => Some(Self::Male),
            _ => None,
        }
    }
}

/// Whether the collaboration is ongoing. Drives present vs. past tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    Active,
    Inactive,
    Unknown,
}

impl Engagement {
    pub fn from_status(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("nieaktywny") || status.contains("inactive") {
            Self::Inactive
        } else if status.contains("aktywny") || status.contains("active") {
            Self::Active
        } else {
            Self::Unknown
        }
    }
}

/// Structured facts about the person a document is generated for.
///
/// Read-only input to the pipeline. `gender` and `status` are optional: absence only
/// weakens the agreement/tense hints, it never fails a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default = "default_end_date")]
    pub end_date: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub main_tasks: String,
    #[serde(default)]
    pub gender: Option<String>,
}

fn default_end_date() -> String {
    OPEN_END_DATE.to_string()
}

impl SubjectRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::from_code)
    }

    pub fn engagement(&self) -> Engagement {
        self.status
            .as_deref()
            .map(Engagement::from_status)
            .unwrap_or(Engagement::Unknown)
    }

    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

/// One document-production request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub document_type: DocumentType,
    pub subject: SubjectRecord,
    /// Free-text coordinator notes. Empty (or whitespace-only) notes skip the model.
    #[serde(default)]
    pub operator_notes: String,
}

impl GenerationRequest {
    pub fn has_operator_notes(&self) -> bool {
        !self.operator_notes.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parses_aliases() {
        assert_eq!(DocumentType::parse("cert"), Some(DocumentType::Certificate));
        assert_eq!(
            DocumentType::parse("Certificate"),
            Some(DocumentType::Certificate)
        );
        assert_eq!(
            DocumentType::parse("praktyka"),
            Some(DocumentType::Internship)
        );
        assert_eq!(DocumentType::parse("diploma"), None);
    }

    #[test]
    fn test_document_type_deserializes_wire_ids() {
        let t: DocumentType = serde_json::from_str("\"cert\"").unwrap();
        assert_eq!(t, DocumentType::Certificate);
        let t: DocumentType = serde_json::from_str("\"praktyka\"").unwrap();
        assert_eq!(t, DocumentType::Internship);
        assert!(serde_json::from_str::<DocumentType>("\"diploma\"").is_err());
    }

    #[test]
    fn test_engagement_distinguishes_inactive_from_active() {
        assert_eq!(Engagement::from_status("aktywny"), Engagement::Active);
        assert_eq!(Engagement::from_status("Nieaktywny"), Engagement::Inactive);
        assert_eq!(Engagement::from_status("active"), Engagement::Active);
        assert_eq!(Engagement::from_status("inactive"), Engagement::Inactive);
        assert_eq!(Engagement::from_status(""), Engagement::Unknown);
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code("K"), Some(Gender::Female));
        assert_eq!(Gender::from_code("m"), Some(Gender::Male));
        assert_eq!(Gender::from_code("x"), None);
    }

    #[test]
    fn test_subject_record_defaults_missing_fields() {
        let json = serde_json::json!({
            "firstName": "Anna",
            "lastName": "Kowalska",
            "team": "Marketing",
            "status": "active"
        });
        let subject: SubjectRecord = serde_json::from_value(json).unwrap();
        assert_eq!(subject.end_date, OPEN_END_DATE);
        assert_eq!(subject.role, "");
        assert!(subject.gender().is_none());
        assert_eq!(subject.engagement(), Engagement::Active);
        assert_eq!(subject.full_name(), "Anna Kowalska");
    }

    #[test]
    fn test_whitespace_notes_count_as_empty() {
        let request = GenerationRequest {
            document_type: DocumentType::References,
            subject: SubjectRecord::default(),
            operator_notes: "  \n\t ".to_string(),
        };
        assert!(!request.has_operator_notes());
    }
}

// Output-format instructions, one per document type.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::DocumentType;

pub const REFERENCES_OUTPUT_FORMAT: &str = r#"Zwróć obiekt JSON w DOKŁADNIE takim formacie:
{"referenceText": "Pełny tekst referencji, 8-10 zdań, akapity oddzielone znakiem \n"}"#;

pub const CERTIFICATE_OUTPUT_FORMAT: &str = r#"Zwróć obiekt JSON w DOKŁADNIE takim formacie:
{"additionalDescription": "Dwa lub trzy zdania w jednym ciągu tekstowym."}"#;

pub const INTERNSHIP_OUTPUT_FORMAT: &str = r#"Zwróć obiekt JSON w DOKŁADNIE takim formacie:
{
  "mainTasks": "1. Zadanie pierwsze. 2. Zadanie drugie. 3. Zadanie trzecie. 4. Zadanie czwarte.",
  "internshipDescription": "Zdanie 1. Zdanie 2. Zdanie 3. Zdanie 4.",
  "generalInformation": "Zdanie 1. Zdanie 2. Zdanie 3. Zdanie 4.",
  "evaluation": "Zdanie 1. Zdanie 2. Zdanie 3. Zdanie 4.",
  "grade": "Celująca | Bardzo dobra | Dobra | Zadowalająca"
}"#;

/// Full output-format instruction for `document_type`, JSON-only rule included.
pub fn output_format(document_type: DocumentType) -> String {
    let format = match document_type {
        DocumentType::References => REFERENCES_OUTPUT_FORMAT,
        DocumentType::Certificate => CERTIFICATE_OUTPUT_FORMAT,
        DocumentType::Internship => INTERNSHIP_OUTPUT_FORMAT,
    };
    format!("{format}\n\n{JSON_ONLY_INSTRUCTION}")
}

//! Best-effort recovery of `"key": "value"` pairs from raw model text.
//!
//! The model is asked for JSON but does not always deliver it: commentary around
//! the object, a trailing comma, duplicated keys, a truncated closing brace. Rather
//! than parse strictly, the widest `{ ... }` span is scanned for string pairs.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::models::RecoveredFields;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no structured data found in model response")]
    NoStructuredDataFound,
}

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""([A-Za-z_][A-Za-z0-9_]*)"\s*:\s*"((?:[^"\\]|\\.)*)""#)
            .expect("pair pattern is a valid regex")
    })
}

/// Recovers a flat key → string mapping.
///
/// Fails only when the text contains no `{` at all. For a repeated key the first
/// non-empty value is kept; a later non-empty value replaces a stored empty one.
pub fn extract(raw: &str) -> Result<RecoveredFields, ExtractError> {
    let candidate = candidate_span(raw).ok_or(ExtractError::NoStructuredDataFound)?;
    let candidate = strip_trailing_comma(candidate);

    let mut fields = RecoveredFields::new();
    for captures in pair_pattern().captures_iter(&candidate) {
        let key = &captures[1];
        let value = unescape(&captures[2]);
        fields.offer(key, value);
    }

    debug!(
        "Recovered {} field(s) from {} chars of model output",
        fields.len(),
        raw.len()
    );
    Ok(fields)
}

/// First `{` to last `}`. Without a closing brace after the opening one the span
/// runs to the end of the text.
fn candidate_span(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let start = raw.find('{')?;
    match raw.rfind('}') {
        Some(end) if end > start => Some(&raw[start..=end]),
        _ => Some(&raw[start..]),
    }
}

/// Removes a `,` (and surrounding whitespace) that sits directly before the final `}`.
fn strip_trailing_comma(candidate: &str) -> String {
    let Some(body) = candidate.strip_suffix('}') else {
        return candidate.to_string();
    };
    let trimmed = body.trim_end();
    match trimmed.strip_suffix(',') {
        Some(without) => format!("{without}}}"),
        None => candidate.to_string(),
    }
}

/// Decodes JSON string escapes. Falls back to a lenient manual pass when the
/// captured text is not a valid JSON string body (e.g. a stray `\x`).
fn unescape(captured: &str) -> String {
    match serde_json::from_str::<String>(&format!("\"{captured}\"")) {
        Ok(value) => value,
        Err(_) => lenient_unescape(captured),
    }
}

fn lenient_unescape(captured: &str) -> String {
    let mut out = String::with_capacity(captured.len());
    let mut chars = captured.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_empty_value_wins() {
        let fields = extract(r#"{"a":"x","a":""}"#).unwrap();
        assert_eq!(fields.get("a"), Some("x"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_later_non_empty_fills_empty_slot() {
        let fields = extract(r#"{"a":"","a":"y"}"#).unwrap();
        assert_eq!(fields.get("a"), Some("y"));
    }

    #[test]
    fn test_two_non_empty_values_keep_the_first() {
        let fields = extract(r#"{"a":"x","a":"z"}"#).unwrap();
        assert_eq!(fields.get("a"), Some("x"));
    }

    #[test]
    fn test_commentary_around_object() {
        let fields = extract(r#"Sure! {"a":"x"} thanks"#).unwrap();
        assert_eq!(fields.get("a"), Some("x"));
    }

    #[test]
    fn test_no_opening_brace_fails() {
        assert_eq!(
            extract("I cannot help with that."),
            Err(ExtractError::NoStructuredDataFound)
        );
        assert_eq!(extract(""), Err(ExtractError::NoStructuredDataFound));
    }

    #[test]
    fn test_brace_without_pairs_is_empty_not_error() {
        let fields = extract("{ }").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_trailing_comma_and_missing_close_brace() {
        let fields = extract("{\"grade\": \"Dobra\",\n}").unwrap();
        assert_eq!(fields.get("grade"), Some("Dobra"));

        let fields = extract(r#"{"referenceText": "Pani Anna pracowała rzetelnie.""#).unwrap();
        assert_eq!(fields.get("referenceText"), Some("Pani Anna pracowała rzetelnie."));
    }

    #[test]
    fn test_widest_span_covers_multiple_objects() {
        let raw = r#"Wersja 1: {"evaluation": ""} Wersja 2: {"evaluation": "Bardzo dobrze."}"#;
        let fields = extract(raw).unwrap();
        assert_eq!(fields.get("evaluation"), Some("Bardzo dobrze."));
    }

    #[test]
    fn test_escapes_are_decoded() {
        let raw = r#"{"referenceText": "Akapit pierwszy.\nAkapit \"drugi\"."}"#;
        let fields = extract(raw).unwrap();
        assert_eq!(
            fields.get("referenceText"),
            Some("Akapit pierwszy.\nAkapit \"drugi\".")
        );
    }

    #[test]
    fn test_invalid_escape_is_kept_literally() {
        let fields = extract(r#"{"a": "C:\x"}"#).unwrap();
        assert_eq!(fields.get("a"), Some("C:\\x"));
    }

    #[test]
    fn test_non_string_values_are_ignored() {
        let fields = extract(r#"{"count": 3, "grade": "Celująca", "ok": true}"#).unwrap();
        assert_eq!(fields.get("grade"), Some("Celująca"));
        assert!(fields.get("count").is_none());
    }
}

// Cross-cutting prompt fragments shared by every document type.
// Per-type output formats live in generation/prompts.rs.

/// Appended to every output-format instruction. The model endpoint is called with
/// `format: "json"`, but the instruction is still spelled out in the prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Zwróć TYLKO poprawny JSON. \
Nie dodawaj żadnego tekstu przed ani po obiekcie JSON. \
Nie używaj bloków kodu markdown. \
Wszystkie wartości muszą być tekstem (string).";

/// Rules that apply regardless of persona.
pub const FACTS_ONLY_INSTRUCTION: &str = "\
Używaj TYLKO informacji, które zostały podane. \
Wyrażaj się w pozytywnym tonie, ale NIE zmieniaj informacji od koordynatora na zawsze pozytywne. \
Jeśli współpraca zakończyła się z powodu braku aktywności lub braku kontaktu, przekaż to w sposób czytelny i profesjonalny.";

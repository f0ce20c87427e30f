//! Prompt composition.
//!
//! `build_prompt` is pure: the same inputs always produce the same bytes. Worked
//! examples and guidelines come before the live task so the last thing the model
//! reads is the concrete subject and the output format.

use crate::agents::{AgentExample, AgentTemplate, ExpectedOutput};
use crate::llm_client::prompts::FACTS_ONLY_INSTRUCTION;
use crate::models::{Engagement, Gender, SubjectRecord};

const SECTION_BREAK: &str = "\n\n";

/// Composes the model request in a fixed order: persona, subject identity and
/// agreement hints, record fields, team context, operator notes, guidelines and
/// key phrases, structure template, output format, worked examples, closing task.
pub fn build_prompt(
    template: &AgentTemplate,
    subject: &SubjectRecord,
    operator_notes: &str,
    context_notes: &str,
    output_format: &str,
) -> String {
    let sections = [
        template.personality.trim().to_string(),
        identity_section(subject),
        record_section(subject),
        context_section(context_notes),
        notes_section(operator_notes),
        guidelines_section(template),
        format!("STRUKTURA DOKUMENTU:\n{}", template.structure_template.trim()),
        format!("FORMAT ODPOWIEDZI:\n{}", output_format.trim()),
        examples_section(template.examples),
        closing_section(subject, output_format),
    ];
    sections.join(SECTION_BREAK)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn identity_section(subject: &SubjectRecord) -> String {
    let mut lines = vec![format!("OSOBA: {}", subject.full_name())];
    if !subject.role.trim().is_empty() {
        lines.push(format!("Rola: {}", subject.role.trim()));
    }
    if let Some(status) = subject.status.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(format!("Status: {}", status.trim()));
    }
    lines.push(gender_hint(subject.gender()).to_string());
    lines.push(tense_hint(subject.engagement()).to_string());
    lines.join("\n")
}

pub(crate) fn gender_hint(gender: Option<Gender>) -> &'static str {
    match gender {
        Some(Gender::Female) => {
            "Płeć: kobieta. Używaj form żeńskich (np. \"wykazywała się\", \"była odpowiedzialna\") oraz zwrotu \"Pani\"."
        }
        Some(Gender::Male) => {
            "Płeć: mężczyzna. Używaj form męskich (np. \"wykazywał się\", \"był odpowiedzialny\") oraz zwrotu \"Pan\"."
        }
        None => {
            "Płeć: nieokreślona. Używaj form neutralnych i unikaj konstrukcji wymagających określenia płci."
        }
    }
}

pub(crate) fn tense_hint(engagement: Engagement) -> &'static str {
    match engagement {
        Engagement::Active => "Współpraca trwa. Pisz w czasie teraźniejszym.",
        Engagement::Inactive => "Współpraca została zakończona. Pisz w czasie przeszłym.",
        Engagement::Unknown => {
            "Status współpracy nieznany. Używaj form neutralnych czasowo tam, gdzie to możliwe."
        }
    }
}

fn record_section(subject: &SubjectRecord) -> String {
    let fields = [
        ("Imię", subject.first_name.as_str()),
        ("Nazwisko", subject.last_name.as_str()),
        ("Zespół", subject.team.as_str()),
        ("Data rozpoczęcia", subject.start_date.as_str()),
        ("Data zakończenia", subject.end_date.as_str()),
        ("Rola", subject.role.as_str()),
        ("Główne zadania", subject.main_tasks.as_str()),
    ];
    let mut text = String::from("DANE Z BAZY:");
    for (label, value) in fields {
        let value = value.trim();
        text.push_str(&format!("\n- {label}: {}", if value.is_empty() { "-" } else { value }));
    }
    text
}

fn context_section(context_notes: &str) -> String {
    let notes = context_notes.trim();
    format!(
        "KONTEKST ZESPOŁU:\n{}",
        if notes.is_empty() { "(brak)" } else { notes }
    )
}

fn notes_section(operator_notes: &str) -> String {
    format!("DODATKOWE INFORMACJE OD KOORDYNATORA:\n{operator_notes}")
}

fn guidelines_section(template: &AgentTemplate) -> String {
    let mut text = String::from("WYTYCZNE:");
    for (i, guideline) in template.guidelines.iter().enumerate() {
        text.push_str(&format!("\n{}. {guideline}", i + 1));
    }
    text.push_str(&format!("\n{}. {FACTS_ONLY_INSTRUCTION}", template.guidelines.len() + 1));

    if !template.key_phrases.is_empty() {
        text.push_str("\n\nPRZYDATNE ZWROTY:");
        for phrase in template.key_phrases {
            text.push_str(&format!("\n- {phrase}"));
        }
    }
    text
}

fn examples_section(examples: &[AgentExample]) -> String {
    let mut text = String::from("PRZYKŁADY:");
    for (i, example) in examples.iter().enumerate() {
        text.push_str(&format!("\n\nPrzykład {}: {}", i + 1, example.description));

        let tags = [
            ("płeć", example.tags.gender),
            ("status", example.tags.status),
            ("zespół", example.tags.team),
            ("rola", example.tags.role),
        ];
        let tags: Vec<String> = tags
            .iter()
            .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
            .collect();
        if !tags.is_empty() {
            text.push_str(&format!("\n({})", tags.join(", ")));
        }

        text.push_str("\nOczekiwany wynik:\n");
        text.push_str(&render_expected(&example.output));
    }
    text
}

/// Prose verbatim; structured output as an indented object with JSON-escaped values.
fn render_expected(output: &ExpectedOutput) -> String {
    match output {
        ExpectedOutput::Prose(text) => text.to_string(),
        ExpectedOutput::Structured(fields) => {
            let body: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("  {}: {}", quote(key), quote(value)))
                .collect();
            format!("{{\n{}\n}}", body.join(",\n"))
        }
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn closing_section(subject: &SubjectRecord, output_format: &str) -> String {
    format!(
        "ZADANIE:\nNapisz teraz treść dokumentu dla osoby: {} (zespół: {}). \
Nie kopiuj treści przykładów, opieraj się wyłącznie na danych tej osoby.\n\
Przypomnienie formatu:\n{}",
        subject.full_name(),
        if subject.team.trim().is_empty() { "-" } else { subject.team.trim() },
        output_format.trim()
    )
}

//! Paginated document renderer.
//!
//! One `render` call owns one canvas and one cursor. The cursor only moves down;
//! before every line is drawn it is checked against the bottom margin and, when
//! below it, a blank page is appended and the cursor resets to the continuation top.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::canvas::{Canvas, CanvasError, FontStyle, Rgb, BLACK};
use crate::layout::fonts::FontSet;
use crate::layout::wrap::wrap_paragraphs;
use crate::models::subject::OPEN_END_DATE;
use crate::models::{DocumentFields, DocumentType, Engagement, Gender, RenderableContent};

/// Distance of the first baseline from the top edge on page 1.
pub const FIRST_PAGE_TOP_OFFSET: f32 = 150.0;
/// Baseline of the first line on continuation pages.
pub const CONTINUATION_TOP: f32 = 750.0;
pub const BOTTOM_MARGIN: f32 = 100.0;
pub const LEFT_MARGIN: f32 = 70.0;
pub const RIGHT_MARGIN: f32 = 70.0;
/// Wrap width for free-text paragraphs.
pub const BODY_WIDTH: f32 = 470.0;

const EMPTY_PLACEHOLDER: &str = "-";
const CLOSING: &str = "Z poważaniem";
const GRADE_COLOR: Rgb = [0.0, 0.4, 0.8];

const POLISH_MONTHS_GENITIVE: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

/// `19 października 2026`
pub fn polish_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        POLISH_MONTHS_GENITIVE[date.month0() as usize],
        date.year()
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Public types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("could not write PDF: {0}")]
    Canvas(#[from] CanvasError),
}

/// Non-fatal degradations recorded during a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// No TrueType family embedded; Polish glyphs may render as `?`.
    FontEmbeddingDegraded { reason: String },
    /// The configured letterhead exists but could not be used; a blank page was used.
    LetterheadUnusable { reason: String },
}

/// One drawn line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub width: f32,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<LayoutWarning>,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone)]
pub struct LayoutSettings {
    /// Place printed before the date, e.g. `Łódź`.
    pub place: String,
    /// Letterhead PDF whose first page becomes the canvas of page 1.
    pub letterhead: Option<PathBuf>,
}

/// Renders `RenderableContent` into PDF bytes. Cheap to clone; fonts are shared.
#[derive(Clone)]
pub struct LayoutEngine {
    fonts: Arc<FontSet>,
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(fonts: Arc<FontSet>, settings: LayoutSettings) -> Self {
        Self { fonts, settings }
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Renders with today's date.
    pub fn render(
        &self,
        document_type: DocumentType,
        content: &RenderableContent,
    ) -> Result<RenderedDocument, LayoutError> {
        self.render_dated(document_type, content, Local::now().date_naive())
    }

    pub fn render_dated(
        &self,
        document_type: DocumentType,
        content: &RenderableContent,
        date: NaiveDate,
    ) -> Result<RenderedDocument, LayoutError> {
        let mut warnings = Vec::new();
        if let Some(reason) = &self.fonts.degraded {
            warnings.push(LayoutWarning::FontEmbeddingDegraded {
                reason: reason.clone(),
            });
        }

        let canvas = self.open_canvas(&mut warnings);
        let mut page = PageWriter::new(canvas);

        let date_line = format!("{}, {}", self.settings.place, polish_date(date));
        page.heading(document_type.title(), title_size(document_type), &date_line);

        match &content.fields {
            DocumentFields::References { reference_text } => {
                render_references(&mut page, content, reference_text)
            }
            DocumentFields::Certificate {
                additional_description,
            } => render_certificate(&mut page, content, additional_description),
            DocumentFields::Internship {
                internship_description,
                general_information,
                evaluation,
                grade,
                ..
            } => render_internship(
                &mut page,
                content,
                [
                    ("Główne zadania:", content.main_tasks.as_str()),
                    ("Opis praktyk:", internship_description.as_str()),
                    ("Ogólne informacje o działaniach:", general_information.as_str()),
                    ("Ocena:", evaluation.as_str()),
                ],
                grade,
            ),
        }

        let placements = std::mem::take(&mut page.placements);
        let page_count = page.canvas.page_count();
        let bytes = page.canvas.finish()?;

        info!(
            "Rendered {} for {}: {} page(s), {} line(s), {} bytes",
            document_type,
            content.full_name(),
            page_count,
            placements.len(),
            bytes.len()
        );

        Ok(RenderedDocument {
            bytes,
            page_count,
            warnings,
            placements,
        })
    }

    fn open_canvas(&self, warnings: &mut Vec<LayoutWarning>) -> Canvas {
        let Some(path) = &self.settings.letterhead else {
            return Canvas::blank(self.fonts.clone());
        };
        if !path.is_file() {
            debug!("No letterhead at {}, using a blank page", path.display());
            return Canvas::blank(self.fonts.clone());
        }

        let loaded = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                Canvas::from_letterhead(&bytes, self.fonts.clone()).map_err(|e| e.to_string())
            });
        match loaded {
            Ok(canvas) => canvas,
            Err(reason) => {
                warn!("Letterhead {} unusable: {reason}", path.display());
                warnings.push(LayoutWarning::LetterheadUnusable { reason });
                Canvas::blank(self.fonts.clone())
            }
        }
    }
}

fn title_size(document_type: DocumentType) -> f32 {
    match document_type {
        DocumentType::Certificate => 22.0,
        DocumentType::References | DocumentType::Internship => 20.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor and page writer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct LayoutCursor {
    page_index: usize,
    x: f32,
    y: f32,
}

struct TextStyle {
    size: f32,
    font: FontStyle,
    color: Rgb,
}

impl TextStyle {
    const fn regular(size: f32) -> Self {
        Self {
            size,
            font: FontStyle::Regular,
            color: BLACK,
        }
    }

    const fn bold(size: f32) -> Self {
        Self {
            size,
            font: FontStyle::Bold,
            color: BLACK,
        }
    }
}

struct PageWriter {
    canvas: Canvas,
    cursor: LayoutCursor,
    page_width: f32,
    placements: Vec<Placement>,
}

impl PageWriter {
    fn new(canvas: Canvas) -> Self {
        let (page_width, page_height) = canvas.first_page_size();
        Self {
            canvas,
            cursor: LayoutCursor {
                page_index: 0,
                x: LEFT_MARGIN,
                y: page_height - FIRST_PAGE_TOP_OFFSET,
            },
            page_width,
            placements: Vec::new(),
        }
    }

    fn right_edge(&self) -> f32 {
        self.page_width - RIGHT_MARGIN
    }

    /// Appends a page when the cursor is below the bottom margin.
    fn ensure_room(&mut self) {
        if self.cursor.y < BOTTOM_MARGIN {
            self.cursor.page_index = self.canvas.add_page();
            self.cursor.y = CONTINUATION_TOP;
            debug!("Overflow: started page {}", self.cursor.page_index + 1);
        }
    }

    fn advance(&mut self, by: f32) {
        self.cursor.y -= by;
    }

    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        self.canvas.measure(text, style.font, style.size)
    }

    /// Draws `text` at `(x, y)` on the current page without moving the cursor.
    fn place(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let width = self.measure(text, style);
        let page = self.cursor.page_index;
        self.canvas
            .draw_text(page, x, y, style.size, style.font, style.color, text);
        self.placements.push(Placement {
            page,
            x,
            y,
            size: style.size,
            width,
            bold: style.font == FontStyle::Bold,
            text: text.to_string(),
        });
    }

    /// Draws one line at the cursor, paginating first.
    fn line_at(&mut self, text: &str, x: f32, style: &TextStyle) {
        self.ensure_room();
        self.cursor.x = x;
        let y = self.cursor.y;
        self.place(text, x, y, style);
    }

    fn centred_line(&mut self, text: &str, style: &TextStyle) {
        let x = ((self.page_width - self.measure(text, style)) / 2.0).max(LEFT_MARGIN);
        self.line_at(text, x, style);
    }

    /// Word-wraps `text` at `x`, advancing `line_height` per line. Returns whether
    /// anything was drawn.
    fn paragraphs(
        &mut self,
        text: &str,
        x: f32,
        max_width: f32,
        line_height: f32,
        style: &TextStyle,
    ) -> bool {
        let paragraphs = {
            let canvas = &self.canvas;
            wrap_paragraphs(text, max_width, |s| canvas.measure(s, style.font, style.size))
        };
        let count = paragraphs.len();
        for (i, lines) in paragraphs.into_iter().enumerate() {
            for line in lines {
                self.line_at(&line, x, style);
                self.advance(line_height);
            }
            if i + 1 < count {
                self.advance(line_height / 2.0);
            }
        }
        count > 0
    }

    /// Like `paragraphs`, but an empty value still draws a placeholder dash.
    fn required_value(
        &mut self,
        text: &str,
        x: f32,
        max_width: f32,
        line_height: f32,
        style: &TextStyle,
    ) {
        if !self.paragraphs(text, x, max_width, line_height, style) {
            self.line_at(EMPTY_PLACEHOLDER, x, style);
            self.advance(line_height);
        }
    }

    /// Bold label at the left margin; value wrapped from `value_x` on the same baseline.
    #[allow(clippy::too_many_arguments)]
    fn labeled_field(
        &mut self,
        label: &str,
        value: &str,
        value_x: f32,
        value_width: f32,
        line_height: f32,
        label_style: &TextStyle,
        value_style: &TextStyle,
    ) {
        self.ensure_room();
        let y = self.cursor.y;
        self.place(label, LEFT_MARGIN, y, label_style);
        self.required_value(value, value_x, value_width, line_height, value_style);
    }

    /// Centred title, then the place/date line right-aligned 5 pt lower.
    fn heading(&mut self, title: &str, size: f32, date_line: &str) {
        self.centred_line(title, &TextStyle::bold(size));
        let date_style = TextStyle::regular(11.0);
        let x = self.right_edge() - self.measure(date_line, &date_style);
        let y = self.cursor.y - 5.0;
        self.place(date_line, x, y, &date_style);
    }

    /// `Z poważaniem`, three line heights below the last drawn baseline.
    fn closing(&mut self, line_height: f32, size: f32) {
        let last_baseline = self
            .placements
            .last()
            .map(|p| (p.page, p.y))
            .unwrap_or((self.cursor.page_index, self.cursor.y));
        if last_baseline.0 == self.cursor.page_index {
            self.cursor.y = last_baseline.1 - 3.0 * line_height;
        }
        self.line_at(CLOSING, LEFT_MARGIN, &TextStyle::regular(size));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document renderers
// ────────────────────────────────────────────────────────────────────────────

fn period(content: &RenderableContent) -> String {
    let start = if content.start_date.trim().is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        content.start_date.trim()
    };
    let end = if content.end_date.trim().is_empty() {
        OPEN_END_DATE
    } else {
        content.end_date.trim()
    };
    format!("{start} - {end}")
}

fn render_references(page: &mut PageWriter, content: &RenderableContent, reference_text: &str) {
    const VALUE_X: f32 = 200.0;
    const VALUE_WIDTH: f32 = 350.0;
    const FIELD_LINE_HEIGHT: f32 = 14.0;
    const BODY_LINE_HEIGHT: f32 = 16.0;

    page.advance(50.0);

    let label = TextStyle::bold(11.0);
    let value = TextStyle::regular(11.0);
    let fields = [
        ("Imię i nazwisko:", content.full_name()),
        ("Okres współpracy:", period(content)),
        ("Zespół:", content.team.clone()),
        ("Główne zadania:", content.main_tasks.clone()),
    ];
    for (name, text) in &fields {
        page.labeled_field(name, text, VALUE_X, VALUE_WIDTH, FIELD_LINE_HEIGHT, &label, &value);
        page.advance(5.0);
    }

    page.advance(25.0);
    page.paragraphs(
        reference_text,
        LEFT_MARGIN,
        BODY_WIDTH,
        BODY_LINE_HEIGHT,
        &TextStyle::regular(11.0),
    );

    page.closing(BODY_LINE_HEIGHT, 11.0);
}

/// Fixed certificate sentence. Active collaborations are described in the present
/// tense; everything else in the past tense, gendered when the gender is known.
pub fn certificate_description(content: &RenderableContent) -> String {
    let team = if content.team.trim().is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        content.team.trim()
    };
    const PROGRAMME: &str = "w ramach programu e-wolontariatu, który wspiera misję społeczną LEVEL UP oraz kompetencje społeczno-zawodowe młodych ludzi";

    if Engagement::from_status(&content.status) == Engagement::Active {
        return format!(
            "jest aktywnym członkiem zespołu {team} i działa {PROGRAMME}. Współpraca rozpoczęła się {}.",
            content.start_date.trim()
        );
    }

    let (was, acted) = match Gender::from_code(&content.gender) {
        Some(Gender::Female) => ("była", "Działała"),
        Some(Gender::Male) => ("był", "Działał"),
        None => ("był(a)", "Działał(a)"),
    };
    let end = content.end_date.trim();
    let until = if end.is_empty() || end == OPEN_END_DATE {
        OPEN_END_DATE.to_string()
    } else {
        format!("do {end}")
    };
    format!(
        "{was} aktywnym członkiem zespołu {team} w okresie od {} {until}. {acted} {PROGRAMME}.",
        content.start_date.trim()
    )
}

fn render_certificate(
    page: &mut PageWriter,
    content: &RenderableContent,
    additional_description: &str,
) {
    const LINE_HEIGHT: f32 = 18.0;

    page.advance(60.0);
    page.centred_line("Niniejszym zaświadcza się, że", &TextStyle::regular(12.0));
    page.advance(35.0);
    page.centred_line(&content.full_name(), &TextStyle::bold(18.0));
    page.advance(40.0);

    let body = TextStyle::regular(12.0);
    page.paragraphs(
        &certificate_description(content),
        LEFT_MARGIN,
        BODY_WIDTH,
        LINE_HEIGHT,
        &body,
    );
    page.advance(25.0);
    page.paragraphs(additional_description, LEFT_MARGIN, BODY_WIDTH, LINE_HEIGHT, &body);

    page.closing(LINE_HEIGHT, 12.0);
}

fn render_internship(
    page: &mut PageWriter,
    content: &RenderableContent,
    sections: [(&str, &str); 4],
    grade: &str,
) {
    const VALUE_X: f32 = 220.0;
    const FIELD_LINE_HEIGHT: f32 = 18.0;
    const SECTION_LINE_HEIGHT: f32 = 13.0;

    page.advance(50.0);

    let label = TextStyle::bold(11.0);
    let value = TextStyle::regular(11.0);
    let value_width = page.right_edge() - VALUE_X;
    let fields = [
        ("Imię i nazwisko:", content.full_name()),
        ("Okres stażu:", period(content)),
        ("Zespół/Dział:", content.team.clone()),
    ];
    for (name, text) in &fields {
        page.labeled_field(name, text, VALUE_X, value_width, FIELD_LINE_HEIGHT, &label, &value);
    }
    let highlight = TextStyle {
        size: 11.0,
        font: FontStyle::Bold,
        color: GRADE_COLOR,
    };
    page.labeled_field(
        "Ocena końcowa:",
        grade,
        VALUE_X,
        value_width,
        FIELD_LINE_HEIGHT,
        &label,
        &highlight,
    );

    page.advance(20.0);

    let section_body = TextStyle::regular(10.0);
    for (title, text) in sections {
        page.line_at(title, LEFT_MARGIN, &TextStyle::bold(11.0));
        page.advance(16.0);
        page.required_value(text, LEFT_MARGIN, BODY_WIDTH, SECTION_LINE_HEIGHT, &section_body);
        page.advance(12.0);
    }

    page.closing(SECTION_LINE_HEIGHT, 11.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::{A4_HEIGHT, A4_WIDTH};
    use crate::models::{RecoveredFields, SubjectRecord};

    fn engine() -> LayoutEngine {
        LayoutEngine::new(
            Arc::new(FontSet::builtin("no fonts in test")),
            LayoutSettings {
                place: "Łódź".to_string(),
                letterhead: None,
            },
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn anna(status: &str) -> SubjectRecord {
        SubjectRecord {
            first_name: "Anna".to_string(),
            last_name: "Kowalska".to_string(),
            team: "Marketing".to_string(),
            start_date: "2024-01-10".to_string(),
            end_date: OPEN_END_DATE.to_string(),
            status: Some(status.to_string()),
            role: "praktykantka".to_string(),
            main_tasks: "Social media".to_string(),
            gender: Some("K".to_string()),
        }
    }

    fn texts(doc: &RenderedDocument) -> Vec<&str> {
        doc.placements.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_polish_date() {
        assert_eq!(polish_date(date()), "19 października 2026");
        assert_eq!(
            polish_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            "1 marca 2025"
        );
    }

    #[test]
    fn test_certificate_with_empty_notes_renders_fixed_text_only() {
        let content = RenderableContent::record_only(DocumentType::Certificate, &anna("active"));
        let doc = engine()
            .render_dated(DocumentType::Certificate, &content, date())
            .unwrap();

        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF"));
        let lines = texts(&doc);
        assert_eq!(lines[0], "ZAŚWIADCZENIE");
        assert_eq!(lines[1], "Łódź, 19 października 2026");
        assert_eq!(lines[2], "Niniejszym zaświadcza się, że");
        assert_eq!(lines[3], "Anna Kowalska");
        assert_eq!(*lines.last().unwrap(), CLOSING);

        let body: String = lines[4..lines.len() - 1].join(" ");
        assert_eq!(body, certificate_description(&content));
        assert!(body.starts_with("jest aktywnym członkiem zespołu Marketing"));
    }

    #[test]
    fn test_certificate_inactive_description_is_gendered() {
        let mut content =
            RenderableContent::record_only(DocumentType::Certificate, &anna("nieaktywny"));
        content.end_date = "2024-06-30".to_string();
        let text = certificate_description(&content);
        assert!(text.starts_with("była aktywnym członkiem zespołu Marketing w okresie od 2024-01-10 do 2024-06-30."));
        assert!(text.contains("Działała w ramach"));

        content.gender = String::new();
        content.end_date = OPEN_END_DATE.to_string();
        let text = certificate_description(&content);
        assert!(text.starts_with("był(a) aktywnym członkiem zespołu Marketing w okresie od 2024-01-10 do dnia dzisiejszego."));
    }

    #[test]
    fn test_date_line_is_right_aligned() {
        let content = RenderableContent::record_only(DocumentType::References, &anna("active"));
        let doc = engine()
            .render_dated(DocumentType::References, &content, date())
            .unwrap();
        let date_line = &doc.placements[1];
        assert!((date_line.x + date_line.width - (A4_WIDTH - RIGHT_MARGIN)).abs() < 0.01);
        assert!((date_line.y - (A4_HEIGHT - FIRST_PAGE_TOP_OFFSET - 5.0)).abs() < 0.01);
    }

    #[test]
    fn test_empty_required_fields_render_dash() {
        let mut subject = anna("active");
        subject.team = String::new();
        let content = RenderableContent::record_only(DocumentType::Internship, &subject);
        let doc = engine()
            .render_dated(DocumentType::Internship, &content, date())
            .unwrap();

        let dash_at = |label: &str| {
            let label = doc.placements.iter().find(|p| p.text == label).unwrap();
            doc.placements
                .iter()
                .any(|p| p.text == "-" && p.page == label.page && (p.y - label.y).abs() < 0.01)
        };
        assert!(dash_at("Zespół/Dział:"));
        assert!(dash_at("Ocena końcowa:"));

        let grade = doc
            .placements
            .iter()
            .find(|p| p.x == 220.0 && p.text == "-" && p.bold)
            .expect("grade placeholder is drawn in bold");
        assert!(grade.bold);

        // Team, grade, and the three sections without recovered text.
        let dashes = doc.placements.iter().filter(|p| p.text == "-").count();
        assert_eq!(dashes, 2 + 3);
    }

    #[test]
    fn test_empty_free_text_is_skipped() {
        let content = RenderableContent::record_only(DocumentType::References, &anna("active"));
        let doc = engine()
            .render_dated(DocumentType::References, &content, date())
            .unwrap();
        let lines = texts(&doc);
        let tasks = lines.iter().position(|l| *l == "Social media").unwrap();
        assert_eq!(lines[tasks + 1], CLOSING);
    }

    #[test]
    fn test_long_text_paginates_above_bottom_margin() {
        let sentence = "Pani Anna aktywnie uczestniczyła w projektach międzynarodowych, \
                        reprezentując Stowarzyszenie LEVEL UP za granicą i budując relacje partnerskie. ";
        let mut recovered = RecoveredFields::new();
        recovered.offer("referenceText", sentence.repeat(120));
        let content =
            RenderableContent::merge(DocumentType::References, &anna("active"), Some(&recovered));

        let doc = engine()
            .render_dated(DocumentType::References, &content, date())
            .unwrap();

        assert!(doc.page_count > 1, "expected overflow, got {} page", doc.page_count);
        for p in &doc.placements {
            assert!(p.y >= BOTTOM_MARGIN, "line below margin: {p:?}");
            if p.x == LEFT_MARGIN && !p.bold && p.text.contains(' ') {
                assert!(p.width <= BODY_WIDTH + 0.01, "line too wide: {p:?}");
            }
        }
        let max_page = doc.placements.iter().map(|p| p.page).max().unwrap();
        assert_eq!(max_page + 1, doc.page_count);
        assert!(doc
            .placements
            .iter()
            .filter(|p| p.page > 0)
            .all(|p| p.y <= CONTINUATION_TOP));

        let reloaded = lopdf::Document::load_mem(&doc.bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), doc.page_count);
    }

    #[test]
    fn test_internship_sections_in_order() {
        let mut recovered = RecoveredFields::new();
        recovered.offer("mainTasks", "1. A. 2. B. 3. C. 4. D.".to_string());
        recovered.offer("internshipDescription", "Opis.".to_string());
        recovered.offer("generalInformation", "Informacje.".to_string());
        recovered.offer("evaluation", "Ocena opisowa.".to_string());
        recovered.offer("grade", "Bardzo dobra".to_string());
        let content =
            RenderableContent::merge(DocumentType::Internship, &anna("active"), Some(&recovered));
        let doc = engine()
            .render_dated(DocumentType::Internship, &content, date())
            .unwrap();

        let lines = texts(&doc);
        let order = [
            "OCENA STAŻU / PRAKTYKI",
            "Ocena końcowa:",
            "Bardzo dobra",
            "Główne zadania:",
            "1. A. 2. B. 3. C. 4. D.",
            "Opis praktyk:",
            "Opis.",
            "Ogólne informacje o działaniach:",
            "Informacje.",
            "Ocena:",
            "Ocena opisowa.",
            CLOSING,
        ];
        let mut from = 0;
        for wanted in order {
            let at = lines[from..]
                .iter()
                .position(|l| *l == wanted)
                .unwrap_or_else(|| panic!("missing or out of order: {wanted}"));
            from += at + 1;
        }

        let grade = doc.placements.iter().find(|p| p.text == "Bardzo dobra").unwrap();
        assert!(grade.bold);
    }

    #[test]
    fn test_degraded_fonts_are_reported() {
        let content = RenderableContent::record_only(DocumentType::Certificate, &anna("active"));
        let doc = engine()
            .render_dated(DocumentType::Certificate, &content, date())
            .unwrap();
        assert_eq!(
            doc.warnings,
            vec![LayoutWarning::FontEmbeddingDegraded {
                reason: "no fonts in test".to_string()
            }]
        );
    }

    fn resolved<'a>(pdf: &'a lopdf::Document, object: &'a lopdf::Object) -> &'a lopdf::Object {
        match object {
            lopdf::Object::Reference(id) => pdf.get_object(*id).unwrap(),
            other => other,
        }
    }

    #[test]
    fn test_embedded_font_is_written_as_type0_with_unicode_map() {
        use crate::layout::fonts::{resolve_fonts, DEFAULT_FAMILIES, DEFAULT_FONT_DIRS};

        let dirs: Vec<PathBuf> = DEFAULT_FONT_DIRS.iter().map(PathBuf::from).collect();
        let fonts = resolve_fonts(&dirs, DEFAULT_FAMILIES);
        if fonts.is_degraded() {
            return;
        }
        let engine = LayoutEngine::new(
            Arc::new(fonts),
            LayoutSettings {
                place: "Łódź".to_string(),
                letterhead: None,
            },
        );
        let content = RenderableContent::record_only(DocumentType::Certificate, &anna("active"));
        let doc = engine
            .render_dated(DocumentType::Certificate, &content, date())
            .unwrap();
        assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);

        let pdf = lopdf::Document::load_mem(&doc.bytes).unwrap();
        let page_id = *pdf.get_pages().get(&1).unwrap();
        let page = pdf.get_dictionary(page_id).unwrap();
        let resources = resolved(&pdf, page.get(b"Resources").unwrap()).as_dict().unwrap();
        let font_dict = resolved(&pdf, resources.get(b"Font").unwrap()).as_dict().unwrap();
        let font = resolved(&pdf, font_dict.get(b"DocgenRegular").unwrap())
            .as_dict()
            .unwrap();

        assert_eq!(font.get(b"Subtype").unwrap().as_name().unwrap(), b"Type0".as_slice());
        assert_eq!(
            font.get(b"Encoding").unwrap().as_name().unwrap(),
            b"Identity-H".as_slice()
        );

        let descendants = resolved(&pdf, font.get(b"DescendantFonts").unwrap())
            .as_array()
            .unwrap();
        let cid_font = resolved(&pdf, &descendants[0]).as_dict().unwrap();
        assert_eq!(
            cid_font.get(b"Subtype").unwrap().as_name().unwrap(),
            b"CIDFontType2".as_slice()
        );
        let widths = resolved(&pdf, cid_font.get(b"W").unwrap()).as_array().unwrap();
        assert!(!widths.is_empty());

        let descriptor = resolved(&pdf, cid_font.get(b"FontDescriptor").unwrap())
            .as_dict()
            .unwrap();
        let font_file = resolved(&pdf, descriptor.get(b"FontFile2").unwrap())
            .as_stream()
            .unwrap();
        assert!(!font_file.content.is_empty());

        // "członkiem" in the fixed description puts `ł` on the regular face.
        let to_unicode = resolved(&pdf, font.get(b"ToUnicode").unwrap())
            .as_stream()
            .unwrap();
        let cmap = to_unicode
            .decompressed_content()
            .unwrap_or_else(|_| to_unicode.content.clone());
        let cmap = String::from_utf8_lossy(&cmap);
        assert!(cmap.contains("<0142>"), "{cmap}");
    }

    #[test]
    fn test_unusable_letterhead_falls_back_to_blank() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"%PDF-broken").unwrap();
        let engine = LayoutEngine::new(
            Arc::new(FontSet::builtin("test")),
            LayoutSettings {
                place: "Łódź".to_string(),
                letterhead: Some(file.path().to_path_buf()),
            },
        );
        let content = RenderableContent::record_only(DocumentType::Certificate, &anna("active"));
        let doc = engine
            .render_dated(DocumentType::Certificate, &content, date())
            .unwrap();
        assert_eq!(doc.page_count, 1);
        assert!(doc
            .warnings
            .iter()
            .any(|w| matches!(w, LayoutWarning::LetterheadUnusable { .. })));
    }
}

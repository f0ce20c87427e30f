//! PDF canvas on top of `lopdf`.
//!
//! Draw calls are recorded per page and written out in `finish`, together with the
//! font objects. Embedded TrueType faces become Type0/Identity-H fonts whose `W`
//! array and ToUnicode map cover exactly the glyphs that were drawn.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;
use tracing::debug;

use crate::layout::font_metrics::winansi_bytes;
use crate::layout::fonts::{Face, FontSet, TrueTypeFace};

/// A4 in points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

const REGULAR_RESOURCE: &str = "DocgenRegular";
const BOLD_RESOURCE: &str = "DocgenBold";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => REGULAR_RESOURCE,
            FontStyle::Bold => BOLD_RESOURCE,
        }
    }
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("could not serialise PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("letterhead has no pages")]
    EmptyLetterhead,
}

/// RGB in 0..=1.
pub type Rgb = [f32; 3];
pub const BLACK: Rgb = [0.0, 0.0, 0.0];

struct CanvasPage {
    /// Page object already present in the document (the letterhead page).
    existing: Option<ObjectId>,
    operations: Vec<Operation>,
}

pub struct Canvas {
    doc: Document,
    pages_root: ObjectId,
    pages: Vec<CanvasPage>,
    first_page_size: (f32, f32),
    fonts: Arc<FontSet>,
    /// Glyphs drawn with each embedded style: gid → (char, advance in font units).
    used_glyphs: HashMap<FontStyle, BTreeMap<u16, (char, u16)>>,
}

impl Canvas {
    /// A fresh document with one blank A4 page.
    pub fn blank(fonts: Arc<FontSet>) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_root = doc.new_object_id();
        doc.objects.insert(
            pages_root,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_root,
        });
        doc.trailer.set("Root", catalog);

        Self {
            doc,
            pages_root,
            pages: vec![CanvasPage {
                existing: None,
                operations: Vec::new(),
            }],
            first_page_size: (A4_WIDTH, A4_HEIGHT),
            fonts,
            used_glyphs: HashMap::new(),
        }
    }

    /// Uses page 1 of `bytes` as the first page. Any further letterhead pages are dropped.
    pub fn from_letterhead(bytes: &[u8], fonts: Arc<FontSet>) -> Result<Self, CanvasError> {
        let mut doc = Document::load_mem(bytes)?;

        let page_count = doc.get_pages().len() as u32;
        if page_count > 1 {
            let extra: Vec<u32> = (2..=page_count).collect();
            doc.delete_pages(&extra);
        }
        let first = *doc
            .get_pages()
            .get(&1)
            .ok_or(CanvasError::EmptyLetterhead)?;

        let root = doc.trailer.get(b"Root")?.as_reference()?;
        let pages_root = doc.get_dictionary(root)?.get(b"Pages")?.as_reference()?;
        let first_page_size = media_box(&doc, first).unwrap_or((A4_WIDTH, A4_HEIGHT));

        Ok(Self {
            doc,
            pages_root,
            pages: vec![CanvasPage {
                existing: Some(first),
                operations: Vec::new(),
            }],
            first_page_size,
            fonts,
            used_glyphs: HashMap::new(),
        })
    }

    pub fn first_page_size(&self) -> (f32, f32) {
        self.first_page_size
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends a blank A4 page and returns its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(CanvasPage {
            existing: None,
            operations: Vec::new(),
        });
        self.pages.len() - 1
    }

    pub fn face(&self, style: FontStyle) -> &Face {
        match style {
            FontStyle::Regular => &self.fonts.regular,
            FontStyle::Bold => &self.fonts.bold,
        }
    }

    /// Width of `text` in points as it will be drawn.
    pub fn measure(&self, text: &str, style: FontStyle, size: f32) -> f32 {
        self.face(style).measure(text, size)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: Rgb,
        text: &str,
    ) {
        let encoded = self.encode(style, text);
        let operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("rg", color.iter().map(|c| real(*c)).collect()),
            Operation::new("Tf", vec![style.resource_name().into(), real(size)]),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encoded, StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
        ];
        if let Some(target) = self.pages.get_mut(page) {
            target.operations.extend(operations);
        }
    }

    fn encode(&mut self, style: FontStyle, text: &str) -> Vec<u8> {
        let face = match self.face(style) {
            Face::Builtin(_) => return winansi_bytes(text),
            Face::Embedded(face) => face.clone(),
        };
        let used = self.used_glyphs.entry(style).or_default();
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let glyph = face.glyph(c);
            used.entry(glyph.id).or_insert((c, glyph.advance));
            bytes.extend_from_slice(&glyph.id.to_be_bytes());
        }
        bytes
    }

    /// Writes fonts, page contents and resources, and serialises the document.
    pub fn finish(mut self) -> Result<Vec<u8>, CanvasError> {
        let font_refs = self.write_fonts();
        let mut font_resources = Dictionary::new();
        for (style, id) in &font_refs {
            font_resources.set(style.resource_name(), *id);
        }

        let pages = std::mem::take(&mut self.pages);
        let mut new_kids = Vec::new();
        for page in pages {
            let content = Content {
                operations: page.operations,
            }
            .encode()?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

            match page.existing {
                Some(page_id) => self.overlay_existing(page_id, content_id, &font_resources)?,
                None => {
                    let page_id = self.doc.add_object(dictionary! {
                        "Type" => "Page",
                        "Parent" => self.pages_root,
                        "MediaBox" => vec![real(0.0), real(0.0), real(A4_WIDTH), real(A4_HEIGHT)],
                        "Resources" => dictionary! { "Font" => font_resources.clone() },
                        "Contents" => content_id,
                    });
                    new_kids.push(page_id);
                }
            }
        }

        if !new_kids.is_empty() {
            let root = self
                .doc
                .get_object_mut(self.pages_root)?
                .as_dict_mut()?;
            let mut kids = root
                .get(b"Kids")
                .and_then(|k| k.as_array())
                .cloned()
                .unwrap_or_default();
            kids.extend(new_kids.iter().map(|id| Object::Reference(*id)));
            let count = kids.len() as i64;
            root.set("Kids", kids);
            root.set("Count", count);
        }

        self.doc.compress();
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        debug!("Serialised PDF: {} bytes", bytes.len());
        Ok(bytes)
    }

    /// Adds our content on top of an existing page, isolating its graphics state.
    fn overlay_existing(
        &mut self,
        page_id: ObjectId,
        content_id: ObjectId,
        fonts: &Dictionary,
    ) -> Result<(), lopdf::Error> {
        let save = self.doc.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
        let restore = self.doc.add_object(Stream::new(dictionary! {}, b"Q\n".to_vec()));

        let page = self.doc.get_dictionary(page_id)?;
        let mut contents = vec![Object::Reference(save)];
        match page.get(b"Contents") {
            Ok(Object::Reference(id)) => contents.push(Object::Reference(*id)),
            Ok(Object::Array(items)) => contents.extend(items.iter().cloned()),
            _ => {}
        }
        contents.push(Object::Reference(restore));
        contents.push(Object::Reference(content_id));

        let mut resources = inherited_resources(&self.doc, page_id);
        let mut font_dict = match resources.get(b"Font") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).cloned().unwrap_or_default(),
            Ok(Object::Dictionary(dict)) => dict.clone(),
            _ => Dictionary::new(),
        };
        for (name, value) in fonts.iter() {
            font_dict.set(name.clone(), value.clone());
        }
        resources.set("Font", font_dict);

        let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
        page.set("Contents", contents);
        page.set("Resources", resources);
        Ok(())
    }

    fn write_fonts(&mut self) -> Vec<(FontStyle, ObjectId)> {
        let regular = self.fonts.regular.clone();
        let bold = self.fonts.bold.clone();

        if regular.same_as(&bold) {
            let mut used = self.used_glyphs.remove(&FontStyle::Regular).unwrap_or_default();
            used.extend(self.used_glyphs.remove(&FontStyle::Bold).unwrap_or_default());
            let id = self.write_font(&regular, &used);
            return vec![(FontStyle::Regular, id), (FontStyle::Bold, id)];
        }

        let regular_used = self.used_glyphs.remove(&FontStyle::Regular).unwrap_or_default();
        let bold_used = self.used_glyphs.remove(&FontStyle::Bold).unwrap_or_default();
        vec![
            (FontStyle::Regular, self.write_font(&regular, &regular_used)),
            (FontStyle::Bold, self.write_font(&bold, &bold_used)),
        ]
    }

    fn write_font(&mut self, face: &Face, used: &BTreeMap<u16, (char, u16)>) -> ObjectId {
        match face {
            Face::Builtin(font) => self.doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            }),
            Face::Embedded(face) => self.write_type0(face, used),
        }
    }

    fn write_type0(&mut self, face: &TrueTypeFace, used: &BTreeMap<u16, (char, u16)>) -> ObjectId {
        let font_file = self.doc.add_object(Stream::new(
            dictionary! { "Length1" => face.data.len() as i64 },
            face.data.clone(),
        ));

        let descriptor = self.doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(face.base_font.clone().into_bytes()),
            "Flags" => 32,
            "FontBBox" => face.bbox.iter().map(|v| Object::Integer(face.to_pdf_units(*v as i32))).collect::<Vec<_>>(),
            "ItalicAngle" => 0,
            "Ascent" => face.to_pdf_units(face.ascent as i32),
            "Descent" => face.to_pdf_units(face.descent as i32),
            "CapHeight" => face.to_pdf_units(face.cap_height as i32),
            "StemV" => 80,
            "FontFile2" => font_file,
        });

        let mut widths = Vec::with_capacity(used.len() * 2);
        for (gid, (_, advance)) in used {
            widths.push(Object::Integer(*gid as i64));
            widths.push(Object::Array(vec![Object::Integer(
                face.to_pdf_units(*advance as i32),
            )]));
        }

        let descendant = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(face.base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor,
            "DW" => 1000,
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode = self
            .doc
            .add_object(Stream::new(dictionary! {}, to_unicode_cmap(used).into_bytes()));

        self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(face.base_font.clone().into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant)],
            "ToUnicode" => to_unicode,
        })
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Page size from `MediaBox`, following `Parent` links for inherited boxes.
fn media_box(doc: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    loop {
        if let Ok(media) = current.get(b"MediaBox") {
            let media = match media {
                Object::Reference(id) => doc.get_object(*id).ok()?,
                other => other,
            };
            let values: Vec<f32> = media.as_array().ok()?.iter().filter_map(number).collect();
            if values.len() == 4 {
                return Some((values[2] - values[0], values[3] - values[1]));
            }
            return None;
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
}

/// The page's resource dictionary (own or inherited), resolved and cloned.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Dictionary {
    let mut current = doc.get_dictionary(page_id).ok();
    while let Some(dict) = current {
        match dict.get(b"Resources") {
            Ok(Object::Dictionary(resources)) => return resources.clone(),
            Ok(Object::Reference(id)) => {
                return doc.get_dictionary(*id).cloned().unwrap_or_default();
            }
            _ => {}
        }
        current = dict
            .get(b"Parent")
            .and_then(|p| p.as_reference())
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    Dictionary::new()
}

fn to_unicode_cmap(used: &BTreeMap<u16, (char, u16)>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &(char, u16))> = used.iter().collect();
    for chunk in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, (c, _)) in chunk {
            let mut utf16 = [0u16; 2];
            let hex: String = c
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{gid:04X}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CIDInit /ProcSet findresource /defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_canvas() -> Canvas {
        Canvas::blank(Arc::new(FontSet::builtin("test")))
    }

    #[test]
    fn test_blank_canvas_serialises_pages() {
        let mut canvas = builtin_canvas();
        canvas.draw_text(0, 70.0, 700.0, 11.0, FontStyle::Regular, BLACK, "Strona 1");
        let second = canvas.add_page();
        canvas.draw_text(second, 70.0, 750.0, 11.0, FontStyle::Bold, BLACK, "Strona 2");
        assert_eq!(canvas.page_count(), 2);

        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
    }

    #[test]
    fn test_letterhead_first_page_is_reused() {
        let mut letterhead = builtin_canvas();
        letterhead.draw_text(0, 70.0, 800.0, 9.0, FontStyle::Regular, BLACK, "Stowarzyszenie LEVEL UP");
        letterhead.add_page();
        let letterhead = letterhead.finish().unwrap();

        let mut canvas =
            Canvas::from_letterhead(&letterhead, Arc::new(FontSet::builtin("test"))).unwrap();
        assert_eq!(canvas.page_count(), 1);
        let (width, height) = canvas.first_page_size();
        assert!((width - A4_WIDTH).abs() < 0.01 && (height - A4_HEIGHT).abs() < 0.01);

        canvas.draw_text(0, 70.0, 690.0, 11.0, FontStyle::Regular, BLACK, "Treść");
        let next = canvas.add_page();
        canvas.draw_text(next, 70.0, 750.0, 11.0, FontStyle::Regular, BLACK, "Dalej");
        let bytes = canvas.finish().unwrap();

        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
    }

    #[test]
    fn test_garbage_letterhead_is_an_error() {
        assert!(Canvas::from_letterhead(b"not a pdf", Arc::new(FontSet::builtin("test"))).is_err());
    }

    #[test]
    fn test_to_unicode_cmap_maps_polish_glyphs() {
        let mut used = BTreeMap::new();
        used.insert(0x0102, ('ł', 500));
        used.insert(0x0003, (' ', 300));
        let cmap = to_unicode_cmap(&used);
        assert!(cmap.contains("2 beginbfchar\n<0003> <0020>\n<0102> <0142>\n"));
    }
}

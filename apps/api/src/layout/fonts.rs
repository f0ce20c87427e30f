//! Font-fallback chain.
//!
//! Families are tried in order; the first whose regular face parses wins. A missing
//! bold face falls back to the regular one. When no family is usable the built-in
//! Helvetica pair is used and the set is marked degraded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::font_metrics::{get_metrics, BuiltinFont};

/// Directories searched when `FONT_DIRS` is not set.
pub const DEFAULT_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/freefont",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/gnu-free",
    "/usr/share/fonts/TTF",
];

#[derive(Debug, Clone, Copy)]
pub struct FontFamily {
    pub name: &'static str,
    pub regular: &'static str,
    pub bold: &'static str,
}

/// Families with full Polish glyph coverage, in preference order.
pub const DEFAULT_FAMILIES: &[FontFamily] = &[
    FontFamily {
        name: "DejaVu Sans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
    },
    FontFamily {
        name: "Liberation Sans",
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
    },
    FontFamily {
        name: "FreeSans",
        regular: "FreeSans.ttf",
        bold: "FreeSansBold.ttf",
    },
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("could not read font file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse font: {0}")]
    Parse(String),
}

// ────────────────────────────────────────────────────────────────────────────
// TrueType faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub id: u16,
    /// Advance width in font units.
    pub advance: u16,
}

/// A parsed TrueType face, with everything needed to measure and embed it.
#[derive(Debug)]
pub struct TrueTypeFace {
    pub base_font: String,
    pub data: Vec<u8>,
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub cap_height: i16,
    pub bbox: [i16; 4],
    glyphs: HashMap<char, Glyph>,
    fallback: Glyph,
}

impl TrueTypeFace {
    pub fn parse(data: Vec<u8>, name_hint: &str) -> Result<Self, FontError> {
        let face =
            ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::Parse(e.to_string()))?;

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|code| {
                    let (Some(c), Some(gid)) = (char::from_u32(code), subtable.glyph_index(code))
                    else {
                        return;
                    };
                    let advance = face.glyph_hor_advance(gid).unwrap_or(0);
                    glyphs.entry(c).or_insert(Glyph {
                        id: gid.0,
                        advance,
                    });
                });
            }
        }
        if glyphs.is_empty() {
            return Err(FontError::Parse(format!("{name_hint}: no Unicode cmap")));
        }

        let notdef = Glyph {
            id: 0,
            advance: face
                .glyph_hor_advance(ttf_parser::GlyphId(0))
                .unwrap_or(face.units_per_em() / 2),
        };
        let fallback = glyphs.get(&'?').copied().unwrap_or(notdef);

        let base_font = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .unwrap_or_else(|| name_hint.to_string());
        let base_font: String = base_font
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();

        let bbox = face.global_bounding_box();

        Ok(Self {
            base_font,
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            cap_height: face.capital_height().unwrap_or(face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            glyphs,
            fallback,
            data,
        })
    }

    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        let hint = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("EmbeddedFont");
        Self::parse(data, hint)
    }

    /// Glyph for `c`, or the face's `?` (then `.notdef`) when it has none.
    pub fn glyph(&self, c: char) -> Glyph {
        self.glyphs.get(&c).copied().unwrap_or(self.fallback)
    }

    pub fn has_glyph(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    /// Scales font units to the 1/1000 em glyph space PDF widths use.
    pub fn to_pdf_units(&self, value: i32) -> i64 {
        (value as i64 * 1000) / self.units_per_em.max(1) as i64
    }

    pub fn measure_em(&self, text: &str) -> f32 {
        let units: u32 = text.chars().map(|c| self.glyph(c).advance as u32).sum();
        units as f32 / self.units_per_em.max(1) as f32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font set
// ────────────────────────────────────────────────────────────────────────────

/// One face as the layout engine sees it.
#[derive(Debug, Clone)]
pub enum Face {
    Embedded(Arc<TrueTypeFace>),
    Builtin(BuiltinFont),
}

impl Face {
    /// Rendered width of `text` in points at `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let em = match self {
            Face::Embedded(face) => face.measure_em(text),
            Face::Builtin(font) => get_metrics(font).measure_str(text),
        };
        em * size
    }

    pub fn same_as(&self, other: &Face) -> bool {
        match (self, other) {
            (Face::Embedded(a), Face::Embedded(b)) => Arc::ptr_eq(a, b),
            (Face::Builtin(a), Face::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FontSet {
    pub family: String,
    pub regular: Face,
    pub bold: Face,
    /// Set when the built-in fallback is in use.
    pub degraded: Option<String>,
}

impl FontSet {
    pub fn builtin(reason: impl Into<String>) -> Self {
        Self {
            family: "Helvetica".to_string(),
            regular: Face::Builtin(BuiltinFont::Helvetica),
            bold: Face::Builtin(BuiltinFont::HelveticaBold),
            degraded: Some(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Walks the family chain over `dirs` and returns the first usable set.
pub fn resolve_fonts(dirs: &[PathBuf], families: &[FontFamily]) -> FontSet {
    for family in families {
        let Some(regular) = find_face(dirs, family.regular) else {
            debug!("Font family {} not available", family.name);
            continue;
        };
        let regular = Arc::new(regular);
        let bold = match find_face(dirs, family.bold) {
            Some(bold) => Face::Embedded(Arc::new(bold)),
            None => {
                warn!("No bold face for {}, using regular for bold text", family.name);
                Face::Embedded(regular.clone())
            }
        };
        info!("Using font family {} ({})", family.name, regular.base_font);
        return FontSet {
            family: family.name.to_string(),
            regular: Face::Embedded(regular),
            bold,
            degraded: None,
        };
    }

    let searched: Vec<String> = families.iter().map(|f| f.name.to_string()).collect();
    warn!(
        "No embeddable font family found ({}), falling back to Helvetica; Polish glyphs may not render",
        searched.join(", ")
    );
    FontSet::builtin(format!("none of [{}] could be embedded", searched.join(", ")))
}

fn find_face(dirs: &[PathBuf], file_name: &str) -> Option<TrueTypeFace> {
    for dir in dirs {
        let path = dir.join(file_name);
        if !path.is_file() {
            continue;
        }
        match TrueTypeFace::load(&path) {
            Ok(face) => return Some(face),
            Err(e) => warn!("Skipping font {}: {e}", path.display()),
        }
    }
    None
}

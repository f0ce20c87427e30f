//! Static font-metric tables for the two built-in PDF base fonts.
//!
//! Used only when no TrueType family could be embedded. Widths come from the
//! Adobe AFM files for Helvetica and Helvetica-Bold, in 1/1000 em.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.
//! Everything else goes through WinAnsiEncoding first: Latin-1 letters measure as
//! their base letter, characters WinAnsi cannot encode are drawn (and measured) as `?`.

use unicode_normalization::UnicodeNormalization;

// ────────────────────────────────────────────────────────────────────────────
// Built-in font enum
// ────────────────────────────────────────────────────────────────────────────

/// PDF standard-14 fonts used as the last resort of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// `BaseFont` name written into the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a built-in font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// WinAnsi punctuation outside Latin-1 (dashes, curly quotes, bullet, ellipsis).
    punctuation: &'static [(char, u16)],
    /// Width for encodable non-letter characters outside ASCII (e.g. `§`, `°`).
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c) as f32).sum::<f32>() / 1000.0
    }

    /// Width of one character in 1/1000 em, after WinAnsi substitution.
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        if let Some((_, width)) = self.punctuation.iter().find(|(p, _)| *p == c) {
            return *width;
        }
        match c {
            '\u{00A0}' => self.widths[0],
            _ if encode_winansi(c).is_none() => self.widths['?' as usize - 32],
            _ => match base_letter(c) {
                Some(base) => self.widths[base as usize - 32],
                None => self.average_char_width,
            },
        }
    }
}

/// ASCII base letter of a Latin-1 accented character (`ó` → `o`).
fn base_letter(c: char) -> Option<char> {
    c.to_string()
        .nfd()
        .next()
        .filter(|b| b.is_ascii_alphabetic())
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsiEncoding
// ────────────────────────────────────────────────────────────────────────────

/// Single-byte WinAnsi code for `c`, if the encoding has one.
pub fn encode_winansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E => Some(code as u8),
        0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match c {
                '\u{20AC}' => 0x80,
                '\u{201A}' => 0x82,
                '\u{0192}' => 0x83,
                '\u{201E}' => 0x84,
                '\u{2026}' => 0x85,
                '\u{2020}' => 0x86,
                '\u{2021}' => 0x87,
                '\u{02C6}' => 0x88,
                '\u{2030}' => 0x89,
                '\u{0160}' => 0x8A,
                '\u{2039}' => 0x8B,
                '\u{0152}' => 0x8C,
                '\u{017D}' => 0x8E,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '\u{02DC}' => 0x98,
                '\u{2122}' => 0x99,
                '\u{0161}' => 0x9A,
                '\u{203A}' => 0x9B,
                '\u{0153}' => 0x9C,
                '\u{017E}' => 0x9E,
                '\u{0178}' => 0x9F,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Encodes `text` for a WinAnsi font. Unencodable characters become `?`.
pub fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| encode_winansi(c).unwrap_or(b'?'))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HELVETICA_PUNCTUATION: [(char, u16); 11] = [
    ('\u{2013}', 556), ('\u{2014}', 1000), ('\u{2026}', 1000), ('\u{2030}', 1000),
    ('\u{2018}', 222), ('\u{2019}', 222), ('\u{201A}', 222),
    ('\u{201C}', 333), ('\u{201D}', 333), ('\u{201E}', 333),
    ('\u{2022}', 350),
];

#[rustfmt::skip]
static HELVETICA_BOLD_PUNCTUATION: [(char, u16); 11] = [
    ('\u{2013}', 556), ('\u{2014}', 1000), ('\u{2026}', 1000), ('\u{2030}', 1000),
    ('\u{2018}', 278), ('\u{2019}', 278), ('\u{201A}', 278),
    ('\u{201C}', 500), ('\u{201D}', 500), ('\u{201E}', 500),
    ('\u{2022}', 350),
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    punctuation: &HELVETICA_PUNCTUATION,
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    punctuation: &HELVETICA_BOLD_PUNCTUATION,
    average_char_width: 556,
};

/// Returns the static metric table for a built-in font.
pub fn get_metrics(font: &BuiltinFont) -> &'static FontMetricTable {
    match font {
        BuiltinFont::Helvetica => &HELVETICA_TABLE,
        BuiltinFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(&BuiltinFont::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&BuiltinFont::Helvetica);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_latin1_letters_measure_as_base_letter() {
        let metrics = get_metrics(&BuiltinFont::Helvetica);
        assert_eq!(metrics.char_width('ó'), metrics.char_width('o'));
        assert_eq!(metrics.char_width('É'), metrics.char_width('E'));
    }

    #[test]
    fn test_unencodable_characters_measure_as_question_mark() {
        let metrics = get_metrics(&BuiltinFont::Helvetica);
        assert_eq!(metrics.char_width('ł'), metrics.char_width('?'));
        assert_eq!(metrics.char_width('ż'), metrics.char_width('?'));
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Niniejszym zaświadcza się, że";
        let regular = get_metrics(&BuiltinFont::Helvetica).measure_str(text);
        let bold = get_metrics(&BuiltinFont::HelveticaBold).measure_str(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_curly_quotes_use_per_font_widths() {
        let regular = get_metrics(&BuiltinFont::Helvetica);
        let bold = get_metrics(&BuiltinFont::HelveticaBold);
        assert_eq!(regular.char_width('\u{2019}'), 222);
        assert_eq!(bold.char_width('\u{2019}'), 278);
        assert_eq!(regular.char_width('\u{201E}'), 333);
        assert_eq!(bold.char_width('\u{201D}'), 500);
        assert_eq!(bold.char_width('\u{2013}'), 556);
        assert!(bold.measure_str("\u{201E}Tak\u{201D}") > regular.measure_str("\u{201E}Tak\u{201D}"));
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(winansi_bytes("Łódź"), vec![b'?', 0xF3, b'd', b'?']);
        assert_eq!(encode_winansi('–'), Some(0x96));
        assert_eq!(encode_winansi('š'), Some(0x9A));
        assert_eq!(encode_winansi('ą'), None);
    }
}

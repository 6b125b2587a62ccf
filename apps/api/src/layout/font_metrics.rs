//! Static font-metric tables for the PDF base-14 families used by the layouts.
//!
//! Character widths are in 1/1000 em, taken from the Adobe AFM files. Italic faces
//! reuse the upright tables: Helvetica-Oblique is identical, Times-Italic differs by a
//! few units per glyph, which the flow engine's greedy wrap tolerates.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Maps a settings override onto a base-14 family. Unknown names return `None`
    /// so the layout keeps its own default.
    pub fn from_setting(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" | "helvetica" | "arial" | "inter" | "lato" | "roboto" => {
                Some(Self::Helvetica)
            }
            "serif" | "times" | "times new roman" | "georgia" | "garamond" | "merriweather" => {
                Some(Self::Times)
            }
            "mono" | "monospace" | "courier" | "courier new" => Some(Self::Courier),
            _ => None,
        }
    }

    /// PostScript base font name for a face of this family.
    pub fn base_font(self, bold: bool, italic: bool) -> &'static str {
        match (self, bold, italic) {
            (Self::Helvetica, false, false) => "Helvetica",
            (Self::Helvetica, true, false) => "Helvetica-Bold",
            (Self::Helvetica, false, true) => "Helvetica-Oblique",
            (Self::Helvetica, true, true) => "Helvetica-BoldOblique",
            (Self::Times, false, false) => "Times-Roman",
            (Self::Times, true, false) => "Times-Bold",
            (Self::Times, false, true) => "Times-Italic",
            (Self::Times, true, true) => "Times-BoldItalic",
            (Self::Courier, false, false) => "Courier",
            (Self::Courier, true, false) => "Courier-Bold",
            (Self::Courier, false, true) => "Courier-Oblique",
            (Self::Courier, true, true) => "Courier-BoldOblique",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paper
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    Letter,
    A4,
}

impl PaperSize {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Some(Self::Letter),
            "a4" => Some(Self::A4),
            _ => None,
        }
    }

    /// Width and height in PostScript points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.28, 841.89),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
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
    /// Fallback for codepoints outside the table.
    average_char_width: u16,
    bullet_width: u16,
    en_dash_width: u16,
}

impl FontMetricTable {
    fn glyph_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{a0}' => self.widths[0],
            '\u{2022}' => self.bullet_width,
            '\u{2013}' => self.en_dash_width,
            '\u{2014}' => 1000,
            '\u{2018}' | '\u{2019}' => self.widths[7],
            '\u{201c}' | '\u{201d}' => self.widths[2],
            _ => self.average_char_width,
        }
    }

    /// Rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars().map(|c| f32::from(self.glyph_width(c))).sum::<f32>() / 1000.0
    }

    /// Rendered width in points at `size_pt`.
    pub fn measure(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_em(s) * size_pt
    }
}

/// Returns the table for a face. Italic faces share the upright widths.
pub fn get_metrics(family: FontFamily, bold: bool) -> &'static FontMetricTable {
    match (family, bold) {
        (FontFamily::Helvetica, false) => &HELVETICA,
        (FontFamily::Helvetica, true) => &HELVETICA_BOLD,
        (FontFamily::Times, false) => &TIMES_ROMAN,
        (FontFamily::Times, true) => &TIMES_BOLD,
        (FontFamily::Courier, _) => &COURIER,
    }
}

static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp–/
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0–9
        278, 278, 584, 584, 584, 556, 1015, // :–@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A–M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N–Z
        278, 278, 278, 469, 556, 333, // [–`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a–m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n–z
        334, 260, 334, 584, // {–~
    ],
    average_char_width: 556,
    bullet_width: 350,
    en_dash_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // sp–/
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0–9
        333, 333, 584, 584, 584, 611, 975, // :–@
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A–M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N–Z
        333, 278, 333, 584, 556, 333, // [–`
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a–m
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n–z
        389, 280, 389, 584, // {–~
    ],
    average_char_width: 611,
    bullet_width: 350,
    en_dash_width: 556,
};

static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // sp–/
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0–9
        278, 278, 564, 564, 564, 444, 921, // :–@
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, // A–M
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, // N–Z
        333, 278, 333, 469, 500, 333, // [–`
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, // a–m
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, // n–z
        480, 200, 480, 541, // {–~
    ],
    average_char_width: 500,
    bullet_width: 350,
    en_dash_width: 500,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, // sp–/
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0–9
        333, 333, 570, 570, 570, 500, 930, // :–@
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, // A–M
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, // N–Z
        333, 278, 333, 581, 500, 333, // [–`
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, // a–m
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, // n–z
        394, 220, 394, 520, // {–~
    ],
    average_char_width: 540,
    bullet_width: 350,
    en_dash_width: 500,
};

static COURIER: FontMetricTable = FontMetricTable {
    widths: [600; 95],
    average_char_width: 600,
    bullet_width: 600,
    en_dash_width: 600,
};

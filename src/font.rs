use crate::{
    refs::{ObjectReferences, RefType},
    Pt,
};
use id_arena::Id;
use pdf_writer::{Name, Pdf};

/// One of the standard PDF base-14 fonts. These are never embedded: every conforming
/// reader ships them, so only their metrics are needed to measure and centre text.
///
/// Text is encoded with WinAnsiEncoding, which covers ASCII, Latin-1 and the common
/// typographic punctuation. Anything outside of that is rendered as `?`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

/// Advance widths (1/1000 em) of ASCII 0x20..=0x7E, index = `ch as usize - 32`
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Width used for Latin-1 letters and anything else outside the ASCII table
const FALLBACK_WIDTH: u16 = 556;

impl BuiltinFont {
    /// The PostScript name of the font
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn char_width(&self, ch: char) -> u16 {
        let table = match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2022}' => 350,
            '\u{2018}' | '\u{2019}' => table[7],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        size * (units as f32 / 1000.0)
    }

    /// Encode text as WinAnsi bytes for a PDF string
    pub fn encode(text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| match ch {
                ' '..='~' => ch as u8,
                '\u{00A0}'..='\u{00FF}' => ch as u32 as u8,
                '\u{20AC}' => 0x80,
                '\u{2026}' => 0x85,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '\u{2022}' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                _ => b'?',
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<BuiltinFont>, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(id.index()));
        let mut font = writer.type1_font(font_id);
        font.base_font(Name(self.base_name().as_bytes()));
        font.encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

use crate::colour::Colour;
use crate::document::Document;
use crate::page::{SpanFont, SpanLayout};
use crate::units::Pt;

/// Cuts `text` down to at most `max_chars` characters. Counts characters rather than
/// bytes, so multi-byte text is never split inside a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Lays out a single line of text horizontally centred on `centre_x`, with its baseline
/// at `baseline_y`. The text is not wrapped; long text simply extends past both sides.
pub fn centered_span(
    document: &Document,
    text: &str,
    font: SpanFont,
    colour: Colour,
    centre_x: Pt,
    baseline_y: Pt,
) -> SpanLayout {
    let width = document.fonts[font.id].width_of(text, font.size);
    SpanLayout {
        text: text.to_string(),
        font,
        colour,
        coords: (centre_x - width / 2.0, baseline_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::font::BuiltinFont;

    #[test]
    fn truncation_counts_characters() {
        let long = "é".repeat(90);
        let cut = truncate_chars(&long, 80);
        assert_eq!(cut.chars().count(), 80);
        assert_eq!(truncate_chars("short", 80), "short");
        assert_eq!(truncate_chars("", 80), "");
    }

    #[test]
    fn spans_are_centred_on_the_requested_point() {
        let mut doc = Document::default();
        let id = doc.add_font(BuiltinFont::Helvetica);
        let font = SpanFont { id, size: Pt(10.0) };
        let span = centered_span(&doc, "Hi", font, colours::BLACK, Pt(100.0), Pt(50.0));
        // "Hi" is 9.44pt wide at 10pt
        assert!((span.coords.0 .0 - (100.0 - 4.72)).abs() < 1e-3);
        assert_eq!(span.coords.1, Pt(50.0));
    }
}

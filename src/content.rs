//! Shared content rendering logic for pages.

use crate::colour::Colour;
use crate::font::BuiltinFont;
use crate::page::{PageContents, SpanLayout};
use pdf_writer::{Content, Name, Str};

/// Renders page contents to a PDF content stream.
///
/// Every item is wrapped in its own save/restore pair so that colours, line widths
/// and dash patterns never leak from one item into the next.
pub(crate) fn render_contents(contents: &[PageContents]) -> Vec<u8> {
    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans);
            }
            PageContents::Image(image) => {
                let position = &image.position;
                content.save_state();
                content.transform([
                    position.width().0,
                    0.0,
                    0.0,
                    position.height().0,
                    position.x1.0,
                    position.y1.0,
                ]);
                content.x_object(Name(format!("I{}", image.image_id.index()).as_bytes()));
                content.restore_state();
            }
            PageContents::Rule(rule) => {
                content.save_state();
                set_stroke_colour(&mut content, rule.colour);
                content.set_line_width(rule.width.0);
                content.move_to(rule.from.0 .0, rule.from.1 .0);
                content.line_to(rule.to.0 .0, rule.to.1 .0);
                content.stroke();
                content.restore_state();
            }
            PageContents::Outline(outline) => {
                content.save_state();
                set_stroke_colour(&mut content, outline.colour);
                content.set_line_width(outline.width.0);
                if let Some((on, off)) = outline.dash {
                    content.set_dash_pattern([on, off], 0.0);
                }
                content.rect(
                    outline.rect.x1.0,
                    outline.rect.y1.0,
                    outline.rect.width().0,
                    outline.rect.height().0,
                );
                content.stroke();
                content.restore_state();
            }
        }
    }

    content.finish()
}

fn render_text_spans(content: &mut Content, spans: &[SpanLayout]) {
    if spans.is_empty() {
        return;
    }

    content.save_state();
    let mut current_colour: Option<Colour> = None;

    for span in spans.iter() {
        if current_colour != Some(span.colour) {
            current_colour = Some(span.colour);
            set_fill_colour(content, span.colour);
        }

        content.begin_text();
        content.set_font(
            Name(format!("F{}", span.font.id.index()).as_bytes()),
            span.font.size.0,
        );
        content.next_line(span.coords.0 .0, span.coords.1 .0);
        content.show(Str(&BuiltinFont::encode(&span.text)));
        content.end_text();
    }

    content.restore_state();
}

fn set_fill_colour(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke_colour(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::page::{OutlineLayout, RuleLayout, SpanFont};
    use crate::rect::Rect;
    use crate::units::Pt;
    use id_arena::Arena;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn empty_page_renders_nothing() {
        assert!(render_contents(&[]).is_empty());
    }

    #[test]
    fn text_is_shown_in_the_registered_font() {
        let mut fonts: Arena<BuiltinFont> = Arena::new();
        let _regular = fonts.alloc(BuiltinFont::Helvetica);
        let bold = fonts.alloc(BuiltinFont::HelveticaBold);
        let span = SpanLayout {
            text: "Page 1 of 2".into(),
            font: SpanFont {
                id: bold,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            coords: (Pt(10.0), Pt(20.0)),
        };
        let rendered = render_contents(&[PageContents::Text(vec![span])]);
        assert!(contains(&rendered, "/F1 12 Tf"));
        assert!(contains(&rendered, "(Page 1 of 2) Tj"));
    }

    #[test]
    fn outlines_are_dashed_and_rules_are_solid() {
        let rendered = render_contents(
            &[
                PageContents::Rule(RuleLayout {
                    from: (Pt(0.0), Pt(5.0)),
                    to: (Pt(100.0), Pt(5.0)),
                    width: Pt(0.5),
                    colour: colours::BLACK,
                }),
                PageContents::Outline(OutlineLayout {
                    rect: Rect::from_origin(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0)),
                    width: Pt(0.3),
                    dash: Some((1.0, 2.0)),
                    colour: colours::GUIDE_BLUE,
                }),
            ],
        );
        assert!(contains(&rendered, "[1 2] 0 d"));
        assert!(contains(&rendered, "1 2 3 4 re"));
        assert!(contains(&rendered, "100 5 l"));
    }
}

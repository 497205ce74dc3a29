use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::BuiltinFont;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::LayoutError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};
use std::collections::BTreeSet;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<BuiltinFont>,
    pub size: Pt,
}

/// A single run of text in one font and colour, positioned by its baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A straight stroked line, such as the rule under the header
#[derive(Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

/// An unfilled rectangle outline, optionally dashed as `(on, off)`
#[derive(Clone, PartialEq, Debug)]
pub struct OutlineLayout {
    pub rect: Rect,
    pub width: Pt,
    pub dash: Option<(f32, f32)>,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Rule(RuleLayout),
    Outline(OutlineLayout),
}

/// A page under construction. Drawing operations accumulate in `contents` in the order
/// they were added; once the page is handed to [`Document::add_page`](crate::Document::add_page)
/// it can no longer be changed.
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(PageContents::Rule(rule));
    }

    pub fn add_outline(&mut self, outline: OutlineLayout) {
        self.contents.push(PageContents::Outline(outline));
    }

    /// Iterate over the images placed on this page, in placement order
    pub fn images(&self) -> impl Iterator<Item = &ImageLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Iterate over every text span on this page
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<BuiltinFont>,
        writer: &mut Pdf,
    ) -> Result<(), LayoutError> {
        let page_type = RefType::Page(page_index);
        let id = refs
            .get(page_type)
            .ok_or(LayoutError::UnresolvedReference(page_type))?;
        let page_tree = refs
            .get(RefType::PageTree)
            .ok_or(LayoutError::UnresolvedReference(RefType::PageTree))?;

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let font_type = RefType::Font(font_id.index());
            let font_ref = refs
                .get(font_type)
                .ok_or(LayoutError::UnresolvedReference(font_type))?;
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
        }
        resource_fonts.finish();

        // only the images actually drawn on this page are referenced from it
        let image_indices: BTreeSet<usize> = self.images().map(|i| i.image_id.index()).collect();
        let mut resource_xobjects = resources.x_objects();
        for index in image_indices {
            let image_type = RefType::Image(index);
            let image_ref = refs
                .get(image_type)
                .ok_or(LayoutError::UnresolvedReference(image_type))?;
            resource_xobjects.pair(Name(format!("I{index}").as_bytes()), image_ref);
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents);
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

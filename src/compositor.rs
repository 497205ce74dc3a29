//! Distributes a sequence of images over grid pages and draws the page furniture
//! (header, footer, captions and the optional debug grid).

use crate::colour::colours;
use crate::config::LayoutConfig;
use crate::document::Document;
use crate::font::BuiltinFont;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{centered_span, compute_grid, contain_fit, truncate_chars, CellBox, Margins};
use crate::page::{ImageLayout, OutlineLayout, Page, RuleLayout, SpanFont};
use crate::pagesize::PageSize;
use crate::units::Pt;
use crate::LayoutError;
use chrono::NaiveDateTime;
use id_arena::Id;
use tracing::{debug, warn};

/// Height reserved at the bottom of a cell for the caption, when the image has one
pub const CAPTION_BAND: Pt = Pt(12.0);
/// Captions longer than this many characters are cut, never wrapped
pub const CAPTION_MAX_CHARS: usize = 80;

const CAPTION_BASELINE_OFFSET: Pt = Pt(2.0);
const TITLE_FONT_SIZE: Pt = Pt(12.0);
const FOOTER_FONT_SIZE: Pt = Pt(9.0);
/// Fraction of the header height between the top margin and the title baseline
const TITLE_BASELINE_RATIO: f32 = 0.6;
const HEADER_RULE_WIDTH: Pt = Pt(0.5);
const GRID_LINE_WIDTH: Pt = Pt(0.3);
const GRID_DASH: (f32, f32) = (1.0, 2.0);

/// An image to place, with the caption to print beneath it
#[derive(Clone)]
pub struct ImageItem {
    pub image: Image,
    pub caption: Option<String>,
}

impl ImageItem {
    pub fn new(image: Image) -> ImageItem {
        ImageItem {
            image,
            caption: None,
        }
    }

    pub fn with_caption<S: ToString>(mut self, caption: S) -> ImageItem {
        self.caption = Some(caption.to_string());
        self
    }
}

/// Number of pages needed for `image_count` images at `per_page` images a page.
/// There is always at least one page, even with nothing to place on it.
pub fn page_count(image_count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    image_count.div_ceil(per_page).max(1)
}

#[derive(Copy, Clone)]
struct Fonts {
    regular: Id<BuiltinFont>,
    bold: Id<BuiltinFont>,
}

/// Lays `items` out on as many pages as they need and returns the finished, unwritten
/// document. Images fill cells in input order; cells left over on the last page stay
/// empty.
///
/// The configuration ranges and the layout geometry are checked before anything is
/// drawn. `generated_at` is printed in the footer and stored as the creation date.
pub fn compose(
    items: Vec<ImageItem>,
    config: &LayoutConfig,
    page_size: PageSize,
    generated_at: NaiveDateTime,
) -> Result<Document, LayoutError> {
    config.validate()?;
    let spec = config.grid_spec();
    compute_grid(page_size, &spec)?;

    let total_pages = page_count(items.len(), spec.capacity());
    debug!(
        images = items.len(),
        per_page = spec.capacity(),
        total_pages,
        "composing document"
    );

    let mut doc = Document::default();
    let mut info = Info::new();
    info.created(generated_at);
    info.title(config.header_title());
    doc.set_info(info);

    let fonts = Fonts {
        regular: doc.add_font(BuiltinFont::Helvetica),
        bold: doc.add_font(BuiltinFont::HelveticaBold),
    };

    let margins = Margins::trbl(
        spec.margin + spec.header,
        spec.margin,
        spec.margin + spec.footer,
        spec.margin,
    );

    let mut items = items.into_iter();
    for page_index in 1..=total_pages {
        let cells = compute_grid(page_size, &spec)?;
        let mut page = Page::new(page_size, Some(margins.clone()));

        draw_header(&doc, &mut page, config, fonts.bold);
        draw_footer(
            &doc,
            &mut page,
            config,
            fonts.regular,
            (page_index, total_pages),
            generated_at,
        );

        let mut placed = 0;
        for (cell, item) in cells.iter().zip(items.by_ref()) {
            place_image(&mut doc, &mut page, cell, item, config, fonts.regular);
            placed += 1;
        }

        if config.show_debug_grid {
            draw_debug_grid(&mut page, &cells);
        }

        debug!(page = page_index, placed, "page composed");
        doc.add_page(page);
    }

    Ok(doc)
}

/// Lays out `items` and seals the result into PDF bytes. Nothing is returned unless
/// the whole document was built.
pub fn layout_document(
    items: Vec<ImageItem>,
    config: &LayoutConfig,
    page_size: PageSize,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, LayoutError> {
    compose(items, config, page_size, generated_at)?.to_bytes()
}

fn draw_header(doc: &Document, page: &mut Page, config: &LayoutConfig, font: Id<BuiltinFont>) {
    let header = config.effective_header();
    if header <= Pt(0.0) {
        return;
    }

    let margin = config.margin();
    let top = page.height() - margin;

    page.add_span(centered_span(
        doc,
        config.header_title(),
        SpanFont {
            id: font,
            size: TITLE_FONT_SIZE,
        },
        colours::BLACK,
        page.width() / 2.0,
        top - header * TITLE_BASELINE_RATIO,
    ));

    let boundary = top - header;
    page.add_rule(RuleLayout {
        from: (margin, boundary),
        to: (page.width() - margin, boundary),
        width: HEADER_RULE_WIDTH,
        colour: colours::BLACK,
    });
}

fn draw_footer(
    doc: &Document,
    page: &mut Page,
    config: &LayoutConfig,
    font: Id<BuiltinFont>,
    (page_index, total_pages): (usize, usize),
    generated_at: NaiveDateTime,
) {
    if config.effective_footer() <= Pt(0.0) {
        return;
    }

    let text = format!(
        "Page {page_index} of {total_pages} \u{2014} generated {}",
        generated_at.format("%d/%m/%Y %H:%M")
    );
    page.add_span(centered_span(
        doc,
        &text,
        SpanFont {
            id: font,
            size: FOOTER_FONT_SIZE,
        },
        colours::BLACK,
        page.width() / 2.0,
        config.margin() / 2.0,
    ));
}

fn place_image(
    doc: &mut Document,
    page: &mut Page,
    cell: &CellBox,
    item: ImageItem,
    config: &LayoutConfig,
    font: Id<BuiltinFont>,
) {
    let ImageItem {
        image,
        caption: raw_caption,
    } = item;
    let caption = raw_caption
        .as_deref()
        .map(|c| truncate_chars(c, CAPTION_MAX_CHARS))
        .filter(|c| !c.is_empty());

    let cell_rect = cell.rect();
    let mut target = cell_rect;
    if caption.is_some() {
        target.y1 += CAPTION_BAND;
    }

    match contain_fit(image.width, image.height, &target) {
        Some(position) => {
            let image_id = doc.add_image(image);
            page.add_image(ImageLayout { image_id, position });
        }
        None => warn!(
            width = image.width,
            height = image.height,
            cell_height = cell.height.0,
            "no room to draw image in its cell"
        ),
    }

    if let Some(caption) = caption {
        page.add_span(centered_span(
            doc,
            caption,
            SpanFont {
                id: font,
                size: Pt(config.caption_font_size),
            },
            colours::BLACK,
            cell_rect.centre_x(),
            cell.y + CAPTION_BASELINE_OFFSET,
        ));
    }
}

fn draw_debug_grid(page: &mut Page, cells: &[CellBox]) {
    for cell in cells {
        page.add_outline(OutlineLayout {
            rect: cell.rect(),
            width: GRID_LINE_WIDTH,
            dash: Some(GRID_DASH),
            colour: colours::GUIDE_BLUE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::page::PageContents;
    use crate::pagesize::{PageOrientation, A4, A5};
    use chrono::NaiveDate;
    use image::DynamicImage;

    fn timestamp(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_opt(hour, 30, 0))
            .expect("valid timestamp")
    }

    /// Images are `index + 1` pixels wide so placement order can be read back
    fn items(count: usize) -> Vec<ImageItem> {
        (0..count)
            .map(|i| {
                ImageItem::new(Image::from_dynamic(DynamicImage::new_rgb8(
                    i as u32 + 1,
                    3,
                )))
            })
            .collect()
    }

    fn placed_widths(doc: &Document, page: &Page) -> Vec<u32> {
        page.images().map(|l| doc.images[l.image_id].width).collect()
    }

    fn layout_for(rows: u32, cols: u32) -> LayoutConfig {
        LayoutConfig {
            rows,
            cols,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        assert_eq!(page_count(0, 8), 1);
        assert_eq!(page_count(1, 8), 1);
        assert_eq!(page_count(8, 8), 1);
        assert_eq!(page_count(9, 8), 2);
        assert_eq!(page_count(17, 8), 3);
        assert_eq!(page_count(5, 1), 5);
    }

    #[test]
    fn no_images_still_produce_one_page_with_header_and_footer() {
        let doc = compose(Vec::new(), &LayoutConfig::default(), A4, timestamp(10)).unwrap();
        assert_eq!(doc.page_count(), 1);
        let page = doc.pages_in_order().next().unwrap();
        assert_eq!(page.images().count(), 0);
        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Image Report", "Page 1 of 1 \u{2014} generated 02/01/2025 10:30"]
        );
        assert!(page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Rule(_))));
    }

    #[test]
    fn a_full_page_then_one_spill_over() {
        let config = layout_for(2, 3);
        let doc = compose(items(6), &config, A4, timestamp(10)).unwrap();
        assert_eq!(doc.page_count(), 1);

        let doc = compose(items(7), &config, A4, timestamp(10)).unwrap();
        assert_eq!(doc.page_count(), 2);
        let pages: Vec<&Page> = doc.pages_in_order().collect();
        assert_eq!(pages[0].images().count(), 6);
        assert_eq!(pages[1].images().count(), 1);
    }

    #[test]
    fn ten_images_on_a_four_by_two_grid() {
        let config = LayoutConfig {
            caption_from_filename: false,
            ..layout_for(4, 2)
        };
        let doc = compose(items(10), &config, A4, timestamp(10)).unwrap();
        let pages: Vec<&Page> = doc.pages_in_order().collect();
        assert_eq!(pages.len(), 2);

        assert_eq!(placed_widths(&doc, pages[0]), (1..=8).collect::<Vec<_>>());
        assert_eq!(placed_widths(&doc, pages[1]), vec![9, 10]);

        // the spill-over lands top-left then top-right
        let cells = compute_grid(A4, &config.grid_spec()).unwrap();
        let second: Vec<&ImageLayout> = pages[1].images().collect();
        assert!(cells[0].rect().contains(&second[0].position, 1e-3));
        assert!(cells[1].rect().contains(&second[1].position, 1e-3));
    }

    #[test]
    fn every_image_is_placed_once_in_its_own_cell() {
        let config = layout_for(3, 2);
        let doc = compose(items(13), &config, A4, timestamp(10)).unwrap();
        let cells = compute_grid(A4, &config.grid_spec()).unwrap();

        let mut seen = Vec::new();
        for page in doc.pages_in_order() {
            for (cell, layout) in cells.iter().zip(page.images()) {
                assert!(cell.rect().contains(&layout.position, 1e-3));
                seen.push(doc.images[layout.image_id].width);
            }
        }
        assert_eq!(seen, (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn long_captions_are_truncated_and_reserve_a_band() {
        let caption = "x".repeat(90);
        let item = ImageItem::new(Image::from_dynamic(DynamicImage::new_rgb8(10, 10)))
            .with_caption(&caption);
        let config = layout_for(1, 1);
        let doc = compose(vec![item], &config, A4, timestamp(10)).unwrap();
        let page = doc.pages_in_order().next().unwrap();

        let captions: Vec<&str> = page
            .spans()
            .map(|s| s.text.as_str())
            .filter(|t| t.starts_with('x'))
            .collect();
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].chars().count(), 80);

        let cell = compute_grid(A4, &config.grid_spec()).unwrap()[0];
        let layout = page.images().next().unwrap();
        assert!(layout.position.y1 >= cell.y + CAPTION_BAND - Pt(1e-3));
    }

    #[test]
    fn hidden_bands_draw_nothing() {
        let config = LayoutConfig {
            show_header: false,
            show_footer: false,
            ..LayoutConfig::default()
        };
        let doc = compose(items(1), &config, A4, timestamp(10)).unwrap();
        let page = doc.pages_in_order().next().unwrap();
        assert_eq!(page.spans().count(), 0);
        assert!(!page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Rule(_))));
    }

    #[test]
    fn an_empty_title_falls_back_to_the_default() {
        let config = LayoutConfig {
            title: String::new(),
            show_footer: false,
            ..LayoutConfig::default()
        };
        let doc = compose(Vec::new(), &config, A4, timestamp(10)).unwrap();
        let page = doc.pages_in_order().next().unwrap();
        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec![crate::config::DEFAULT_TITLE]);
        assert!(page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Rule(_))));
    }

    #[test]
    fn debug_grid_is_drawn_over_the_images() {
        let config = LayoutConfig {
            show_debug_grid: true,
            ..layout_for(2, 2)
        };
        let doc = compose(items(3), &config, A4, timestamp(10)).unwrap();
        let page = doc.pages_in_order().next().unwrap();
        let outlines: Vec<usize> = page
            .contents
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, PageContents::Outline(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(outlines.len(), 4, "one outline per cell, filled or not");
        let last_image = page
            .contents
            .iter()
            .rposition(|c| matches!(c, PageContents::Image(_)))
            .unwrap();
        assert!(outlines.iter().all(|&i| i > last_image));
    }

    #[test]
    fn degenerate_geometry_fails_before_drawing() {
        // every value is in range, but the bands leave no room for six rows
        let config = LayoutConfig {
            margin_mm: 30.0,
            header_mm: 40.0,
            footer_mm: 40.0,
            gutter_mm: 10.0,
            rows: 6,
            ..LayoutConfig::default()
        };
        let result = compose(items(2), &config, A5.landscape(), timestamp(10));
        assert!(matches!(
            result,
            Err(LayoutError::Configuration(ConfigError::DegenerateCell { .. }))
        ));
    }

    #[test]
    fn out_of_range_values_fail_before_drawing() {
        let config = LayoutConfig {
            margin_mm: 120.0,
            ..LayoutConfig::default()
        };
        let result = compose(items(2), &config, A4, timestamp(10));
        assert!(matches!(
            result,
            Err(LayoutError::Configuration(ConfigError::OutOfRange { field: "margin_mm", .. }))
        ));
    }

    #[test]
    fn a_nan_margin_produces_no_document() {
        let config = LayoutConfig {
            margin_mm: f32::NAN,
            ..LayoutConfig::default()
        };
        let result = layout_document(items(1), &config, A4, timestamp(10));
        assert!(matches!(result, Err(LayoutError::Configuration(_))));
    }

    #[test]
    fn identical_inputs_give_identical_bytes() {
        let config = LayoutConfig::default();
        let first = layout_document(items(5), &config, A4, timestamp(10)).unwrap();
        let second = layout_document(items(5), &config, A4, timestamp(10)).unwrap();
        assert_eq!(first, second);

        let later = layout_document(items(5), &config, A4, timestamp(11)).unwrap();
        assert_ne!(first, later);
    }
}

use crate::error::ConfigError;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// The parameters that partition a page into a uniform grid of cells.
///
/// `header` and `footer` are the *effective* band heights: a hidden band is passed
/// as zero, the calculator has no notion of a band being switched off.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub margin: Pt,
    pub gutter: Pt,
    pub header: Pt,
    pub footer: Pt,
}

impl GridSpec {
    /// How many cells fit on one page
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// One slot of the page grid, with a bottom-left origin
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellBox {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl CellBox {
    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.x, self.y, self.width, self.height)
    }
}

/// The area cells are laid out in: the page minus margins and header/footer bands
pub fn printable_area(page: PageSize, spec: &GridSpec) -> Rect {
    let (width, height) = page;
    Rect {
        x1: spec.margin,
        y1: spec.margin + spec.footer,
        x2: width - spec.margin,
        y2: height - spec.margin - spec.header,
    }
}

/// Computes the rectangle of every cell on a page.
///
/// Cells are returned row-major: the top row first, left to right within each row. That
/// order decides which image lands in which cell.
///
/// Returns a [`ConfigError`] instead of degenerate boxes when the margins, gutters and
/// bands leave no room for the cells.
pub fn compute_grid(page: PageSize, spec: &GridSpec) -> Result<Vec<CellBox>, ConfigError> {
    let (page_width, page_height) = page;

    if spec.rows == 0 || spec.cols == 0 {
        return Err(ConfigError::EmptyGrid {
            rows: spec.rows,
            cols: spec.cols,
        });
    }
    if !is_positive(page_width) || !is_positive(page_height) {
        return Err(ConfigError::InvalidPage {
            width: page_width,
            height: page_height,
        });
    }
    for (field, value) in [
        ("margin", spec.margin),
        ("gutter", spec.gutter),
        ("header", spec.header),
        ("footer", spec.footer),
    ] {
        if !(value.0 >= 0.0 && value.0.is_finite()) {
            return Err(ConfigError::NegativeLength { field, value });
        }
    }

    let rows = spec.rows as f32;
    let cols = spec.cols as f32;

    let available_width = page_width - spec.margin * 2.0;
    let available_height = page_height - spec.margin * 2.0 - spec.header - spec.footer;

    let cell_width = (available_width - spec.gutter * (cols - 1.0)) / cols;
    let cell_height = (available_height - spec.gutter * (rows - 1.0)) / rows;

    if !is_positive(cell_width) || !is_positive(cell_height) {
        return Err(ConfigError::DegenerateCell {
            width: cell_width,
            height: cell_height,
        });
    }

    let top = page_height - spec.margin - spec.header;
    let mut cells = Vec::with_capacity(spec.capacity());
    for r in 0..spec.rows {
        for c in 0..spec.cols {
            let (r, c) = (r as f32, c as f32);
            cells.push(CellBox {
                x: spec.margin + (cell_width + spec.gutter) * c,
                y: top - cell_height * (r + 1.0) - spec.gutter * r,
                width: cell_width,
                height: cell_height,
            });
        }
    }

    Ok(cells)
}

/// Finite and strictly greater than zero. NaN fails every comparison, so it fails here too.
fn is_positive(length: Pt) -> bool {
    length.0.is_finite() && length.0 > 0.0
}

//! Geometry for laying images out on pages.
//!
//! - [`compute_grid`](crate::layout::compute_grid) partitions a page into equally sized cells
//! - [`contain_fit`](crate::layout::contain_fit) scales an image into a cell without cropping
//! - [`centered_span`](crate::layout::centered_span) positions single lines of text
//!
//! # Example
//!
//! ```
//! use pdf_grid::layout::{compute_grid, contain_fit, GridSpec};
//! use pdf_grid::{pagesize, Mm, Pt};
//!
//! let spec = GridSpec {
//!     rows: 4,
//!     cols: 2,
//!     margin: Mm(12.0).into(),
//!     gutter: Mm(3.0).into(),
//!     header: Mm(18.0).into(),
//!     footer: Pt(0.0),
//! };
//! let cells = compute_grid(pagesize::A4, &spec).expect("layout fits on the page");
//! assert_eq!(cells.len(), 8);
//!
//! let placed = contain_fit(1920, 1080, &cells[0].rect()).expect("cell has an area");
//! assert!(placed.width() <= cells[0].width);
//! ```

mod fit;
mod grid;
mod margins;
mod text;

pub use fit::*;
pub use grid::*;
pub use margins::*;
pub use text::*;

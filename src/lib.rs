//! Lays batches of raster images out on grid-paginated PDF documents.
//!
//! Images are placed one per cell, in order, on as many pages as they need, with an
//! optional title header, a page-numbered footer and per-image captions. Each named
//! [Group] of images becomes its own document; many groups can be built at once with
//! [build_groups] and bundled into a single ZIP with [bundle_archive].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pdf_grid::{layout_document, pagesize, Image, ImageItem, LayoutConfig};
//!
//! let generated_at = NaiveDate::from_ymd_opt(2025, 1, 1)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .unwrap();
//! let items = (1..=10)
//!     .map(|i| ImageItem::new(Image::from_dynamic(image::DynamicImage::new_rgb8(40, 30)))
//!         .with_caption(format!("image {i}")))
//!     .collect();
//! let config = LayoutConfig {
//!     title: "Contact sheet".to_string(),
//!     ..LayoutConfig::default()
//! };
//!
//! let pdf = layout_document(items, &config, pagesize::A4, generated_at).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

mod archive;
pub use archive::*;

mod colour;
pub use colour::*;

mod compositor;
pub use compositor::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod group;
pub use group::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod job;
pub use job::*;

/// Geometry for placing images and text on pages
pub mod layout;

mod page;
pub use page::*;

/// Common paper sizes, in points
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;

//! Layout parameters, as supplied by the caller or a JSON job file.

use crate::error::ConfigError;
use crate::layout::GridSpec;
use crate::pagesize::{self, PageOrientation, PageSize};
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// Header title used when none is configured
pub const DEFAULT_TITLE: &str = "Image Report";

/// The physical paper formats documents can be laid out on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    pub fn dimensions(&self) -> PageSize {
        match self {
            PaperSize::A3 => pagesize::A3,
            PaperSize::A4 => pagesize::A4,
            PaperSize::A5 => pagesize::A5,
            PaperSize::Letter => pagesize::LETTER,
            PaperSize::Legal => pagesize::LEGAL,
        }
    }
}

/// Everything that controls how a group of images is laid out. Lengths are in
/// millimetres, font sizes in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Drawn centred in the header band
    pub title: String,
    pub rows: u32,
    pub cols: u32,
    pub margin_mm: f32,
    /// Space between neighbouring cells
    pub gutter_mm: f32,
    pub header_mm: f32,
    pub footer_mm: f32,
    pub show_header: bool,
    pub show_footer: bool,
    /// Caption every image with its file name, minus the extension
    pub caption_from_filename: bool,
    pub caption_font_size: f32,
    /// Outline every cell with a dashed guide line
    pub show_debug_grid: bool,
    pub paper: PaperSize,
    pub landscape: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            title: DEFAULT_TITLE.to_string(),
            rows: 4,
            cols: 2,
            margin_mm: 12.0,
            gutter_mm: 3.0,
            header_mm: 18.0,
            footer_mm: 12.0,
            show_header: true,
            show_footer: true,
            caption_from_filename: false,
            caption_font_size: 9.0,
            show_debug_grid: false,
            paper: PaperSize::A4,
            landscape: false,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON. Missing fields take their default values.
    /// The result is not validated, see [LayoutConfig::validate].
    pub fn from_json(json: &str) -> Result<LayoutConfig, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Checks every parameter against the range the layout accepts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("rows", self.rows as f32, 1.0, 6.0),
            ("cols", self.cols as f32, 1.0, 4.0),
            ("margin_mm", self.margin_mm, 5.0, 30.0),
            ("gutter_mm", self.gutter_mm, 0.0, 10.0),
            ("header_mm", self.header_mm, 0.0, 40.0),
            ("footer_mm", self.footer_mm, 0.0, 40.0),
            ("caption_font_size", self.caption_font_size, 7.0, 12.0),
        ];
        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// The page every document is laid out on
    pub fn page_size(&self) -> PageSize {
        let size = self.paper.dimensions();
        if self.landscape {
            size.landscape()
        } else {
            size.portrait()
        }
    }

    /// The configured title, or [DEFAULT_TITLE] when it is blank
    pub fn header_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    pub fn margin(&self) -> Pt {
        Mm(self.margin_mm).into()
    }

    /// Header height actually reserved on the page, zero when the header is hidden
    pub fn effective_header(&self) -> Pt {
        if self.show_header {
            Mm(self.header_mm).into()
        } else {
            Pt(0.0)
        }
    }

    /// Footer height actually reserved on the page, zero when the footer is hidden
    pub fn effective_footer(&self) -> Pt {
        if self.show_footer {
            Mm(self.footer_mm).into()
        } else {
            Pt(0.0)
        }
    }

    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            rows: self.rows,
            cols: self.cols,
            margin: self.margin(),
            gutter: Mm(self.gutter_mm).into(),
            header: self.effective_header(),
            footer: self.effective_footer(),
        }
    }
}

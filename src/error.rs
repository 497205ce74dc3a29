use crate::image::ImageError;
use crate::units::Pt;
use thiserror::Error;

/// Problems with the layout parameters. These are detected before anything is drawn
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse layout configuration: {0}")]
    /// The configuration document was not valid JSON or had the wrong shape
    Parse(#[from] serde_json::Error),

    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    /// A parameter is outside the range the layout accepts
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    /// Page capacity would be zero
    EmptyGrid { rows: u32, cols: u32 },

    #[error("page size must be positive (got {width} x {height})")]
    /// The page has no area to lay anything out on
    InvalidPage { width: Pt, height: Pt },

    #[error("{field} must be a finite, non-negative length (got {value})")]
    /// A margin, gutter or band height is negative or not a number
    NegativeLength { field: &'static str, value: Pt },

    #[error("margins, gutters, header and footer leave no room for cells (cell would be {width} x {height})")]
    /// The computed cell dimensions are zero or negative
    DegenerateCell { width: Pt, height: Pt },
}

/// All errors that can occur while laying out and writing a document
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    /// The layout configuration is unusable
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    /// An image could not be prepared for embedding
    Image(#[from] ImageError),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error("unable to list images in {dir}: {source}")]
    /// A group's image directory could not be read
    ListImages {
        dir: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("page order refers to a page that is not in the document")]
    /// The document's page order is out of sync with its pages
    PageMissing,

    #[error("{0:?} was referenced before it was written")]
    /// An object was referenced before an id had been generated for it
    UnresolvedReference(crate::refs::RefType),

    #[error(transparent)]
    /// [zip] failed to write the archive
    Archive(#[from] zip::result::ZipError),
}

//! Named batches of raw image files, each turned into its own document.

use crate::compositor::{compose, ImageItem};
use crate::config::LayoutConfig;
use crate::image::{Image, ImageError};
use crate::LayoutError;
use chrono::NaiveDateTime;
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// File extensions picked up when a group is read from a directory
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// Used in file names when a group name has nothing usable in it
const FALLBACK_NAME: &str = "group";

/// An undecoded image file, named the way the user supplied it
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A named, ordered batch of images that becomes one document
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub name: String,
    pub files: Vec<SourceImage>,
}

/// An image left out of its document, and why
#[derive(Debug)]
pub struct SkippedImage {
    pub name: String,
    pub reason: ImageError,
}

impl Group {
    pub fn new<S: ToString>(name: S) -> Group {
        Group {
            name: name.to_string(),
            files: Vec::new(),
        }
    }

    pub fn with_image<S: ToString>(mut self, name: S, bytes: Vec<u8>) -> Group {
        self.files.push(SourceImage {
            name: name.to_string(),
            bytes,
        });
        self
    }

    /// Reads every file in `paths`, in the given order. Files that cannot be read are
    /// returned separately rather than failing the group.
    pub fn from_paths<S, P>(name: S, paths: &[P]) -> (Group, Vec<SkippedImage>)
    where
        S: ToString,
        P: AsRef<Path>,
    {
        let mut group = Group::new(name);
        let mut unreadable = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match std::fs::read(path) {
                Ok(bytes) => group.files.push(SourceImage {
                    name: file_name,
                    bytes,
                }),
                Err(e) => {
                    warn!(group = %group.name, file = %path.display(), "unable to read image: {e}");
                    unreadable.push(SkippedImage {
                        name: file_name,
                        reason: e.into(),
                    });
                }
            }
        }

        (group, unreadable)
    }

    /// Reads the image files directly inside `dir`, sorted by file name. Only files
    /// with one of the [IMAGE_EXTENSIONS] are considered.
    pub fn from_dir<S: ToString>(
        name: S,
        dir: &Path,
    ) -> Result<(Group, Vec<SkippedImage>), std::io::Error> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(Group::from_paths(name, paths.as_slice()))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// The caption shown for a file: its name without the extension
pub fn caption_from_name(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// Decodes every file of the group, keeping input order. Files that fail to decode are
/// returned as [SkippedImage]s and the rest move up to fill their place.
pub fn decode_group(group: &Group, captions: bool) -> (Vec<ImageItem>, Vec<SkippedImage>) {
    let mut items = Vec::with_capacity(group.files.len());
    let mut skipped = Vec::new();

    for file in &group.files {
        match Image::from_bytes(&file.bytes) {
            Ok(image) => {
                debug!(file = %file.name, width = image.width, height = image.height, "decoded image");
                let item = ImageItem::new(image);
                items.push(if captions {
                    item.with_caption(caption_from_name(&file.name))
                } else {
                    item
                });
            }
            Err(reason) => {
                warn!(group = %group.name, file = %file.name, "skipping image: {reason}");
                skipped.push(SkippedImage {
                    name: file.name.clone(),
                    reason,
                });
            }
        }
    }

    (items, skipped)
}

/// Suggested file name for a group's document, `{name}_{YYYYMMDD_HHMMSS}.pdf`. The
/// name is trimmed and anything other than letters, digits, `-` and `_` becomes `_`.
pub fn document_filename(group_name: &str, generated_at: NaiveDateTime) -> String {
    let sanitized: String = group_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if sanitized.is_empty() {
        FALLBACK_NAME
    } else {
        &sanitized
    };
    format!("{stem}_{}.pdf", generated_at.format("%Y%m%d_%H%M%S"))
}

/// A finished document for one group
#[derive(Debug)]
pub struct GroupDocument {
    pub name: String,
    /// Suggested file name, see [document_filename]
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Number of images drawn in the document
    pub placed: usize,
    pub pages: usize,
    pub skipped: Vec<SkippedImage>,
}

/// A group that produced no document
#[derive(Error, Debug)]
#[error("failed to build document for group {group:?}: {source}")]
pub struct BuildError {
    pub group: String,
    pub source: LayoutError,
}

impl BuildError {
    pub(crate) fn new<E: Into<LayoutError>>(group: &str, source: E) -> BuildError {
        BuildError {
            group: group.to_string(),
            source: source.into(),
        }
    }
}

/// Builds the document for a single group. Images that fail to decode are skipped
/// and reported in the result; only an unusable configuration or a failure to write
/// the document fails the group.
pub fn build_group(
    group: &Group,
    config: &LayoutConfig,
    generated_at: NaiveDateTime,
) -> Result<GroupDocument, BuildError> {
    config
        .validate()
        .map_err(|e| BuildError::new(&group.name, e))?;

    let (items, skipped) = decode_group(group, config.caption_from_filename);
    if items.is_empty() && !group.files.is_empty() {
        warn!(group = %group.name, "no image in the group could be decoded");
    }

    let mut doc = compose(items, config, config.page_size(), generated_at)
        .map_err(|e| BuildError::new(&group.name, e))?;
    if let Some(info) = doc.info.as_mut() {
        info.subject(&group.name);
    }

    let placed = doc.images.len();
    let pages = doc.page_count();
    let bytes = doc.to_bytes().map_err(|e| BuildError::new(&group.name, e))?;

    info!(
        group = %group.name,
        placed,
        pages,
        skipped = skipped.len(),
        size = bytes.len(),
        "document built"
    );

    Ok(GroupDocument {
        name: group.name.clone(),
        filename: document_filename(&group.name, generated_at),
        bytes,
        placed,
        pages,
        skipped,
    })
}

/// The outcome of building many groups at once
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents in the order their groups were given
    pub documents: Vec<GroupDocument>,
    pub failures: Vec<BuildError>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "{} of {} documents produced",
            self.documents.len(),
            self.documents.len() + self.failures.len()
        )
    }

    /// True when groups were attempted and none of them produced a document
    pub fn nothing_produced(&self) -> bool {
        self.documents.is_empty() && !self.failures.is_empty()
    }
}

/// Builds every group concurrently with the same configuration and timestamp. A failed
/// group never stops the others.
pub fn build_groups(
    groups: &[Group],
    config: &LayoutConfig,
    generated_at: NaiveDateTime,
) -> BatchReport {
    let results: Vec<Result<GroupDocument, BuildError>> = groups
        .par_iter()
        .map(|group| build_group(group, config, generated_at))
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(document) => report.documents.push(document),
            Err(e) => {
                error!(group = %e.group, "{e}");
                report.failures.push(e);
            }
        }
    }
    report
}

//! Bundles the documents of one request into a single ZIP archive.

use crate::group::GroupDocument;
use crate::LayoutError;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name for an archive generated at `generated_at`, `documents_{YYYYMMDD_HHMMSS}.zip`
pub fn archive_filename(generated_at: NaiveDateTime) -> String {
    format!("documents_{}.zip", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Makes every name unique, keeping the first occurrence as-is and numbering later
/// ones before their extension (`a.pdf`, `a_2.pdf`, `a_3.pdf`).
pub fn unique_filenames<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for name in names {
        let mut candidate = name.to_string();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = numbered(name, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}

fn numbered(name: &str, n: usize) -> String {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            format!("{}_{n}.{}", stem.to_string_lossy(), ext.to_string_lossy())
        }
        _ => format!("{name}_{n}"),
    }
}

/// Writes every document into a deflated ZIP, one entry per document named by its
/// suggested file name
pub fn bundle_archive(documents: &[GroupDocument]) -> Result<Vec<u8>, LayoutError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let names = unique_filenames(documents.iter().map(|d| d.filename.as_str()));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, document) in names.into_iter().zip(documents) {
        debug!(entry = %name, size = document.bytes.len(), "adding archive entry");
        zip.start_file(name, options)?;
        zip.write_all(&document.bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;
    use zip::ZipArchive;

    fn document(filename: &str, bytes: &[u8]) -> GroupDocument {
        GroupDocument {
            name: filename.to_string(),
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
            placed: 0,
            pages: 1,
            skipped: Vec::new(),
        }
    }

    #[test]
    fn archive_names_carry_the_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap();
        assert_eq!(archive_filename(ts), "documents_20241231_235958.zip");
    }

    #[test]
    fn duplicates_are_numbered() {
        let names = unique_filenames(["a.pdf", "b.pdf", "a.pdf", "a.pdf", "a_2.pdf", "noext", "noext"]);
        assert_eq!(
            names,
            vec!["a.pdf", "b.pdf", "a_2.pdf", "a_3.pdf", "a_2_2.pdf", "noext", "noext_2"]
        );
    }

    #[test]
    fn every_document_becomes_an_entry() {
        let documents = vec![
            document("x.pdf", b"%PDF-first"),
            document("y.pdf", b"%PDF-second"),
            document("x.pdf", b"%PDF-third"),
        ];
        let bytes = bundle_archive(&documents).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut contents = String::new();
        archive
            .by_name("x_2.pdf")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "%PDF-third");

        let entry = archive.by_name("y.pdf").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn an_empty_batch_is_an_empty_archive() {
        let bytes = bundle_archive(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}

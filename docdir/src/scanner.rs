//! Typed file discovery inside a collection directory.
//!
//! Only the directory itself is listed; subdirectories are never entered.
//! A symlink counts as a file when its target is a regular file. A missing or
//! unreadable directory yields no records instead of an error.

use std::path::Path;

use walkdir::WalkDir;

use crate::document::{DocumentRecord, DocumentType};

/// List the files of one type directly inside `dir`.
///
/// Records are returned in file-name order with no content. Requesting
/// [`DocumentType::Unsupported`] always yields an empty list.
#[must_use]
pub fn scan(dir: &Path, doc_type: DocumentType) -> Vec<DocumentRecord> {
    let Some(wanted) = doc_type.extension() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for entry_result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                tracing::debug!("Skipping unreadable entry in {}: {walk_err}", dir.display());
                continue;
            }
        };

        // `Path::is_file` resolves symlinks; `max_depth(1)` keeps the walk flat.
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        let Some(stem) = stem_for_extension(name, wanted) else {
            continue;
        };

        records.push(DocumentRecord::scanned(
            stem.to_owned(),
            path.to_path_buf(),
            doc_type,
        ));
    }

    tracing::trace!(
        "Scanned {} for .{wanted}: {} candidate(s)",
        dir.display(),
        records.len()
    );
    records
}

/// Strip `.{ext}` from a file name. A bare `.html` has an empty stem.
fn stem_for_extension<'a>(name: &'a str, ext: &str) -> Option<&'a str> {
    name.strip_suffix(ext)?.strip_suffix('.')
}

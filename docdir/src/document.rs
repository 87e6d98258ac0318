//! Document records and the closed set of document types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Type of a stored document, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Html,
    Pdf,
    Xls,
    /// Any extension outside the accepted set. Never scanned for.
    Unsupported,
}

impl DocumentType {
    /// Accepted types, in the order they are scanned and returned.
    pub const ACCEPTED: [DocumentType; 3] = [Self::Html, Self::Pdf, Self::Xls];

    /// File extension (without the dot) scanned for this type.
    #[must_use]
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("html"),
            Self::Pdf => Some("pdf"),
            Self::Xls => Some("xls"),
            Self::Unsupported => None,
        }
    }

    /// Map a file extension to its type. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "html" => Self::Html,
            "pdf" => Self::Pdf,
            "xls" => Self::Xls,
            _ => Self::Unsupported,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension().unwrap_or("unsupported"))
    }
}

/// One document discovered in a collection directory.
///
/// Created by the scanner with no content, narrowed to one record per
/// document family by the version resolver, then filled in by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Document family after resolution; the extension-stripped file name before.
    pub logical_name: String,
    /// Extension-stripped name of the physical file, e.g. `report.115`.
    pub file_stem: String,
    /// Full path of the physical file.
    pub path: PathBuf,
    /// File text, present once loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Type derived from the extension at scan time.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}

impl DocumentRecord {
    /// Create an unloaded record for a scanned file.
    #[must_use]
    pub fn scanned(file_stem: String, path: PathBuf, doc_type: DocumentType) -> Self {
        Self {
            logical_name: file_stem.clone(),
            file_stem,
            path,
            content: None,
            doc_type,
        }
    }

    /// Document family: first dot-delimited segment of the file stem.
    #[must_use]
    pub fn family(&self) -> &str {
        self.file_stem.split('.').next().unwrap_or_default()
    }

    /// Version token: last dot-delimited segment of the file stem.
    ///
    /// For an unversioned stem this is the whole stem.
    #[must_use]
    pub fn version(&self) -> &str {
        self.file_stem.rsplit('.').next().unwrap_or_default()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }
}

//! Per-type document handlers.
//!
//! Every resolved document is dispatched on its [`DocumentType`]. The html,
//! pdf and xls handlers do not transform anything yet; they acknowledge the
//! document so the response can report what was processed.

use docdir::{DocumentRecord, DocumentType};
use serde::Serialize;

/// Outcome of dispatching one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandledDocument {
    /// Document family.
    pub name: String,
    /// File name of the version that was handled.
    pub file: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub handled: bool,
}

/// Route a document to the handler for its type.
#[must_use]
pub fn dispatch(record: &DocumentRecord) -> HandledDocument {
    let handled = match record.doc_type {
        DocumentType::Html => handle_html(record),
        DocumentType::Pdf => handle_pdf(record),
        DocumentType::Xls => handle_xls(record),
        DocumentType::Unsupported => {
            tracing::warn!("No handler for {}", record.path.display());
            false
        }
    };

    HandledDocument {
        name: record.logical_name.clone(),
        file: record
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_owned(),
        doc_type: record.doc_type,
        handled,
    }
}

fn handle_html(record: &DocumentRecord) -> bool {
    acknowledge("html", record)
}

fn handle_pdf(record: &DocumentRecord) -> bool {
    acknowledge("pdf", record)
}

fn handle_xls(record: &DocumentRecord) -> bool {
    acknowledge("xls", record)
}

fn acknowledge(kind: &str, record: &DocumentRecord) -> bool {
    let size = record.content.as_ref().map_or(0, String::len);
    tracing::debug!(
        "{kind} handler: {} ({size} bytes)",
        record.path.display()
    );
    record.is_loaded()
}

//! The document directory service.

use std::sync::Arc;

use crate::config::DirectoryConfig;
use crate::document::{DocumentRecord, DocumentType};
use crate::error::Result;
use crate::loader::{self, LoadLimits};
use crate::path::DocumentLocation;
use crate::scanner;
use crate::version;

/// Resolves and loads the current documents of a collection.
///
/// Holds only immutable configuration; clones share it and may serve
/// concurrent requests without synchronization.
#[derive(Debug, Clone)]
pub struct DocumentDirectoryService {
    config: Arc<DirectoryConfig>,
}

impl DocumentDirectoryService {
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Whether `{root}/{upper}/{lower}` is an existing directory.
    ///
    /// Never fails: invalid segments, an absent `lower`, missing paths and
    /// unreadable paths all report `false`.
    #[must_use]
    pub fn exists(&self, upper: &str, lower: Option<&str>) -> bool {
        match DocumentLocation::new(&self.config.root, upper, lower) {
            Ok(location) => location.is_existing_dir(),
            Err(e) => {
                tracing::debug!("Collection under {upper} rejected: {e}");
                false
            }
        }
    }

    /// Fetch the latest version of every accepted document in a collection.
    ///
    /// Records are grouped by type in html, pdf, xls order and, within a type,
    /// by first appearance of their family in file-name order. A collection
    /// that does not exist yields an empty list; check [`Self::exists`] first
    /// to tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns an input error for an absent or invalid segment, and an I/O
    /// error if any resolved document cannot be read. No partial result is
    /// returned on failure.
    pub async fn fetch_documents(
        &self,
        upper: &str,
        lower: Option<&str>,
    ) -> Result<Vec<DocumentRecord>> {
        let location = DocumentLocation::new(&self.config.root, upper, lower)?;
        let ordering = self.config.version_ordering;

        let resolved = tokio::task::spawn_blocking(move || {
            DocumentType::ACCEPTED
                .into_iter()
                .flat_map(|doc_type| {
                    version::resolve(scanner::scan(location.dir(), doc_type), ordering)
                })
                .collect::<Vec<_>>()
        })
        .await?;

        tracing::debug!(
            "Resolved {} document(s) in {upper}/{}",
            resolved.len(),
            lower.unwrap_or_default()
        );

        loader::load(
            resolved,
            LoadLimits {
                max_concurrent_reads: self.config.max_concurrent_reads,
                max_file_size: self.config.max_file_size,
            },
        )
        .await
    }
}

//! Collection directory locations under the configured root.
//!
//! A collection lives at `{root}/{upper}/{lower}`. Both segments come from
//! callers (ultimately from request paths and headers), so each one must
//! name exactly one directory level below its parent.

use std::path::{Component, Path, PathBuf};

use crate::error::{DirectoryError, Result};

/// A validated `{root}/{upper}/{lower}` collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    dir: PathBuf,
}

impl DocumentLocation {
    /// Build the location of a collection.
    ///
    /// An absent `lower` is rejected rather than collapsed to `{root}/{upper}`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::MissingLowerDirectory`] when `lower` is `None`
    /// and [`DirectoryError::InvalidSegment`] when either segment is empty,
    /// a `.`/`..` reference, or contains a path separator.
    pub fn new(root: &Path, upper: &str, lower: Option<&str>) -> Result<Self> {
        let lower = lower.ok_or(DirectoryError::MissingLowerDirectory)?;
        check_segment(upper)?;
        check_segment(lower)?;
        Ok(Self {
            dir: root.join(upper).join(lower),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the location denotes an existing, readable directory.
    #[must_use]
    pub fn is_existing_dir(&self) -> bool {
        std::fs::metadata(&self.dir).is_ok_and(|meta| meta.is_dir())
    }
}

fn check_segment(segment: &str) -> Result<()> {
    let invalid = |reason| DirectoryError::InvalidSegment {
        segment: segment.to_owned(),
        reason,
    };

    if segment.is_empty() {
        return Err(invalid("segment is empty"));
    }
    if segment.contains(['/', '\\', '\0']) {
        return Err(invalid("path separators are not allowed"));
    }

    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("must name a single directory")),
    }
}

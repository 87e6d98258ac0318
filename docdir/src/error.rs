//! Error types for document directory resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or loading documents.
///
/// Scanning and version resolution never fail; only location building,
/// configuration and content loading produce these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    /// A resolved document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A resolved document exceeded the configured size limit.
    #[error("{} exceeds maximum size of {limit} bytes", path.display())]
    FileTooLarge {
        /// The oversized file.
        path: PathBuf,
        /// The configured `max_file_size`.
        limit: u64,
    },

    /// A directory segment would escape or alias the configured root.
    #[error("Invalid directory segment '{segment}': {reason}")]
    InvalidSegment {
        /// The raw segment as supplied by the caller.
        segment: String,
        /// Human-readable description of the problem.
        reason: &'static str,
    },

    /// No lower directory was supplied.
    #[error("Lower directory is required")]
    MissingLowerDirectory,

    /// Configuration could not be assembled.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A blocking scan or read task did not complete.
    #[error("Background task failed: {0}")]
    Task(String),
}

impl DirectoryError {
    /// Whether the error was caused by caller input rather than the filesystem.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidSegment { .. } | Self::MissingLowerDirectory
        )
    }
}

impl From<tokio::task::JoinError> for DirectoryError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DirectoryError>;

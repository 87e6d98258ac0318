//! Configuration for the document directory service.
//!
//! The service takes an explicit [`DirectoryConfig`] at construction time.
//! [`DirectoryConfig::from_lookup`] assembles one from an optional JSON
//! settings file and a variable lookup (the binary passes the process
//! environment); library callers usually just use [`DirectoryConfig::new`].

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{DirectoryError, Result};
use crate::version::VersionOrdering;

/// Environment variables consulted for the root directory, in priority order.
pub const ROOT_ENV_VARS: &[&str] = &["DOCDIR_ROOT", "BaseDirectoryUrl"];

/// Service configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DirectoryConfig {
    /// Base directory holding `{upper}/{lower}` collections.
    pub root: PathBuf,
    /// Maximum number of files read concurrently per request (default: 8).
    pub max_concurrent_reads: usize,
    /// Maximum size of a single document in bytes (default: `52_428_800`).
    pub max_file_size: u64,
    /// Version comparison policy (default: lexicographic).
    pub version_ordering: VersionOrdering,
}

impl DirectoryConfig {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_concurrent_reads: 8,
            max_file_size: 52_428_800,
            version_ordering: VersionOrdering::default(),
        }
    }

    /// Load configuration from an optional settings file and a variable lookup.
    ///
    /// Variables named in [`ROOT_ENV_VARS`] override the settings file's
    /// `BaseDirectoryUrl`. Numeric settings may be JSON numbers or numeric
    /// strings, as `local.settings.json` stores every value as a string.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the settings file cannot be read
    /// or parsed, or if no root directory is configured anywhere.
    pub fn from_lookup<F>(settings_file: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = match settings_file {
            Some(path) => SettingsFile::read(path)?,
            None => Settings::default(),
        };

        let root = ROOT_ENV_VARS
            .iter()
            .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
            .or(settings.base_directory_url)
            .ok_or_else(|| {
                DirectoryError::Config(format!(
                    "no base directory configured (set BaseDirectoryUrl in settings or one of {})",
                    ROOT_ENV_VARS.join(", ")
                ))
            })?;

        let mut config = Self::new(root);
        if let Some(n) = settings.max_concurrent_reads {
            if n == 0 {
                return Err(DirectoryError::Config(
                    "MaxConcurrentReads must be at least 1".to_owned(),
                ));
            }
            config.max_concurrent_reads = n;
        }
        if let Some(limit) = settings.max_file_size {
            config.max_file_size = limit;
        }
        if let Some(ordering) = settings.version_ordering {
            config.version_ordering = ordering;
        }
        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Settings {
    base_directory_url: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    max_concurrent_reads: Option<usize>,
    #[serde(default, deserialize_with = "number_or_string")]
    max_file_size: Option<u64>,
    version_ordering: Option<VersionOrdering>,
}

impl Settings {
    /// Field-wise overlay: values set in `over` win.
    fn overlay(self, over: Settings) -> Settings {
        Settings {
            base_directory_url: over.base_directory_url.or(self.base_directory_url),
            max_concurrent_reads: over.max_concurrent_reads.or(self.max_concurrent_reads),
            max_file_size: over.max_file_size.or(self.max_file_size),
            version_ordering: over.version_ordering.or(self.version_ordering),
        }
    }
}

fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Option::<Raw<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number '{text}': {e}"))),
    }
}

/// `local.settings.json` shape: keys at the top level and/or under `Values`.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Values")]
    values: Option<Settings>,
    #[serde(flatten)]
    top_level: Settings,
}

impl SettingsFile {
    fn read(path: &Path) -> Result<Settings> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DirectoryError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let file: SettingsFile = serde_json::from_str(&raw).map_err(|e| {
            DirectoryError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(match file.values {
            Some(values) => file.top_level.overlay(values),
            None => file.top_level,
        })
    }
}

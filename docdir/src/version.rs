//! Version resolution: one record per document family.
//!
//! A file stem splits on `.` into a family (first segment) and a version
//! token (last segment). `report.112` and `report.115` are two versions of
//! `report`; `report` alone is its own version token. Within a family the
//! greatest token under the configured [`VersionOrdering`] wins.
//!
//! The default ordering is plain string comparison, so `"9"` beats `"10"`.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Deserialize;

use crate::document::DocumentRecord;

/// How two version tokens of the same family are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VersionOrdering {
    /// Byte-wise string comparison.
    #[default]
    Lexicographic,
    /// Compare as unsigned integers when both tokens parse as one,
    /// otherwise fall back to string comparison.
    NumericThenLexicographic,
}

impl VersionOrdering {
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexicographic => a.cmp(b),
            Self::NumericThenLexicographic => match (a.parse::<u128>(), b.parse::<u128>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.cmp(b),
            },
        }
    }
}

/// Keep only the latest version of each document family.
///
/// Families are emitted in order of first appearance. The surviving record
/// keeps its own `path` and `file_stem` but its `logical_name` is reduced to
/// the family. On equal tokens the earlier record wins.
#[must_use]
pub fn resolve(records: Vec<DocumentRecord>, ordering: VersionOrdering) -> Vec<DocumentRecord> {
    let mut winners: Vec<DocumentRecord> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in records {
        let family = record.family().to_owned();
        match slots.get(&family) {
            Some(&slot) => {
                let current = &mut winners[slot];
                if ordering.compare(record.version(), current.version()) == Ordering::Greater {
                    tracing::trace!(
                        "{} supersedes {} in family '{family}'",
                        record.file_stem,
                        current.file_stem
                    );
                    *current = record;
                }
            }
            None => {
                slots.insert(family, winners.len());
                winners.push(record);
            }
        }
    }

    for winner in &mut winners {
        let family = winner.family().to_owned();
        winner.logical_name = family;
    }
    winners
}

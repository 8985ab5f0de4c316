//! Staleness decision
//!
//! Pure comparison between the manifest's timestamp and the newest
//! effective timestamp among eligible definitions.

use chrono::{DateTime, Utc};

/// Whether the manifest must be rebuilt, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    /// Rebuild requested explicitly
    Forced,
    /// No manifest on disk yet
    ManifestMissing,
    /// A definition changed after the manifest was written
    DefinitionNewer {
        key: String,
        modified: DateTime<Utc>,
    },
    /// Nothing to do
    UpToDate,
}

impl Staleness {
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, Staleness::UpToDate)
    }

    /// Decide from already-gathered timestamps
    ///
    /// `newest` is the definition with the greatest effective timestamp, or
    /// `None` when there are no eligible definitions.
    pub fn decide(
        force: bool,
        manifest_modified: Option<DateTime<Utc>>,
        newest: Option<(String, DateTime<Utc>)>,
    ) -> Self {
        if force {
            return Staleness::Forced;
        }
        let Some(manifest_modified) = manifest_modified else {
            return Staleness::ManifestMissing;
        };
        match newest {
            Some((key, modified)) if modified > manifest_modified => {
                Staleness::DefinitionNewer { key, modified }
            }
            _ => Staleness::UpToDate,
        }
    }
}

impl std::fmt::Display for Staleness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Staleness::Forced => write!(f, "rebuild requested"),
            Staleness::ManifestMissing => write!(f, "no manifest found"),
            Staleness::DefinitionNewer { key, modified } => {
                write!(f, "{} changed at {}", key, modified.to_rfc3339())
            }
            Staleness::UpToDate => write!(f, "manifest is up to date"),
        }
    }
}

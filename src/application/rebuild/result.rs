//! Rebuild result types

use crate::application::manifest_builder::{BuildSummary, FailedDefinition};
use crate::domain::services::Staleness;

/// Result of a rebuild run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    /// Why the manifest was (or was not) rebuilt
    pub staleness: Staleness,
    /// Definitions found under the library root
    pub discovered: usize,
    /// Definitions excluded by license
    pub excluded: usize,
    /// Entries in the manifest left in place, when no rebuild happened
    pub existing_entries: Option<usize>,
    /// Present when a rebuild happened
    pub build: Option<BuildSummary>,
}

impl RebuildReport {
    pub fn rebuilt(&self) -> bool {
        self.build.is_some()
    }

    /// Number of manifest entries written
    pub fn entries(&self) -> usize {
        self.build.as_ref().map_or(0, |b| b.entries)
    }

    pub fn failures(&self) -> &[FailedDefinition] {
        self.build.as_ref().map_or(&[], |b| b.failures.as_slice())
    }
}

//! License filter
//!
//! Scans definitions for a declared license and collects those that must
//! not be compiled. Unreadable or malformed files are reported and treated as
//! not excluded; the compiler gets to reject them later.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::Definition;
use crate::domain::services::license_policy::declared_license;
use crate::error::ManifestResult;
use crate::infrastructure::fs::discover_definitions;

/// Paths of definitions excluded because of their license
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: BTreeSet<PathBuf>,
}

impl ExclusionSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// License-based exclusion of definitions
#[derive(Debug, Clone)]
pub struct LicenseFilter {
    fragments: Vec<String>,
}

impl LicenseFilter {
    pub fn new(fragments: &[String]) -> Self {
        Self {
            fragments: fragments.to_vec(),
        }
    }

    /// Enumerate every definition under `root` and collect the excluded ones
    pub fn find_excluded(&self, root: &Path) -> ManifestResult<ExclusionSet> {
        let definitions = discover_definitions(root)?;
        Ok(self.scan(&definitions))
    }

    /// Collect the excluded definitions among `definitions`
    pub fn scan(&self, definitions: &[Definition]) -> ExclusionSet {
        let mut paths = BTreeSet::new();
        for definition in definitions {
            if self.is_excluded(definition) {
                paths.insert(definition.path().to_path_buf());
            }
        }
        ExclusionSet { paths }
    }

    fn is_excluded(&self, definition: &Definition) -> bool {
        let source = match std::fs::read_to_string(definition.path()) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("cannot read {}: {}", definition.path().display(), err);
                return false;
            }
        };

        match declared_license(&source) {
            Ok(Some(license)) => match license.matching_fragment(&self.fragments) {
                Some(fragment) => {
                    tracing::debug!("excluding {} (license matches {:?})", definition.key(), fragment);
                    true
                }
                None => false,
            },
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("error parsing YAML in {}: {}", definition.path().display(), err);
                false
            }
        }
    }
}

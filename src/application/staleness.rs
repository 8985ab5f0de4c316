//! Staleness oracle
//!
//! Decides whether the manifest must be rebuilt. A definition's effective
//! timestamp is its filesystem mtime when it has uncommitted changes and the
//! time of its last commit otherwise, so fresh clones (where every file
//! shares the checkout time) do not look newer than the manifest.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::entities::Definition;
use crate::domain::ports::{HistoryOracle, ManifestRepository};
use crate::domain::services::Staleness;
use crate::error::ManifestResult;
use crate::infrastructure::fs::modified_time;

/// Staleness check over eligible definitions
pub struct StalenessOracle<'a, H, R>
where
    H: HistoryOracle,
    R: ManifestRepository,
{
    history: &'a H,
    repository: &'a R,
}

impl<'a, H, R> StalenessOracle<'a, H, R>
where
    H: HistoryOracle,
    R: ManifestRepository,
{
    pub fn new(history: &'a H, repository: &'a R) -> Self {
        Self {
            history,
            repository,
        }
    }

    /// Decide whether the manifest at `manifest_path` is stale
    ///
    /// `definitions` must already exclude license-filtered files.
    pub fn check(
        &self,
        force: bool,
        definitions: &[Definition],
        manifest_path: &Path,
    ) -> ManifestResult<Staleness> {
        if force {
            return Ok(Staleness::Forced);
        }
        let manifest_modified = self.repository.modified_time(manifest_path)?;
        if manifest_modified.is_none() {
            return Ok(Staleness::ManifestMissing);
        }

        let newest = self.newest_definition(definitions);
        Ok(Staleness::decide(false, manifest_modified, newest))
    }

    fn newest_definition(&self, definitions: &[Definition]) -> Option<(String, DateTime<Utc>)> {
        definitions
            .iter()
            .filter_map(|definition| {
                self.effective_timestamp(definition)
                    .map(|time| (definition.key().to_string(), time))
            })
            .max_by_key(|(_, time)| *time)
    }

    /// Effective modification time, `None` if the file cannot be inspected
    pub fn effective_timestamp(&self, definition: &Definition) -> Option<DateTime<Utc>> {
        let path = definition.path();

        let committed = match self.history.is_modified(path) {
            Ok(true) => None,
            Ok(false) => match self.history.last_snapshot_time(path) {
                Ok(time) => time,
                Err(err) => {
                    tracing::debug!("using mtime for {}: {}", definition.key(), err);
                    None
                }
            },
            Err(err) => {
                tracing::debug!("using mtime for {}: {}", definition.key(), err);
                None
            }
        };
        if committed.is_some() {
            return committed;
        }

        match modified_time(path) {
            Ok(time) => Some(time),
            Err(err) => {
                tracing::warn!("cannot stat {}: {}", path.display(), err);
                None
            }
        }
    }
}

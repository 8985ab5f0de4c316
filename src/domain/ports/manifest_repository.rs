//! ManifestRepository port - abstraction for manifest persistence
//!
//! This trait allows the domain layer to load/save the manifest
//! without knowing about JSON serialization details.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::entities::Manifest;
use crate::error::ManifestResult;

/// Abstract repository for manifest persistence
pub trait ManifestRepository {
    /// Modification time of the persisted manifest, `None` if there is none
    fn modified_time(&self, path: &Path) -> ManifestResult<Option<DateTime<Utc>>>;

    /// Load the manifest at `path`
    fn load(&self, path: &Path) -> ManifestResult<Manifest>;

    /// Replace the manifest at `path` with `manifest`
    ///
    /// Either the new manifest is fully written or the previous file is left
    /// as it was.
    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()>;
}

//! JSON Manifest Repository
//!
//! Implements the ManifestRepository port using JSON. Field names follow the
//! layout the parser runtime reads (`class_name`, `python_path`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    normalize_manifest_key, ArtifactRef, Manifest, ManifestEntry,
};
use crate::domain::ports::ManifestRepository;
use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::fs::{atomic_write, modified_time};

/// JSON-based manifest repository
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestRepository;

impl JsonManifestRepository {
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of one artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonArtifact {
    class_name: String,
    python_path: String,
}

/// JSON representation of a manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonEntry {
    class_name: String,
    python_path: String,
    #[serde(default)]
    dependencies: Vec<JsonArtifact>,
}

impl From<&ArtifactRef> for JsonArtifact {
    fn from(artifact: &ArtifactRef) -> Self {
        Self {
            class_name: artifact.symbol().to_string(),
            python_path: normalize_manifest_key(artifact.path()),
        }
    }
}

impl From<JsonArtifact> for ArtifactRef {
    fn from(artifact: JsonArtifact) -> Self {
        ArtifactRef::new(artifact.class_name, PathBuf::from(artifact.python_path))
    }
}

impl ManifestRepository for JsonManifestRepository {
    fn modified_time(&self, path: &Path) -> ManifestResult<Option<DateTime<Utc>>> {
        match modified_time(path) {
            Ok(time) => Ok(Some(time)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self, path: &Path) -> ManifestResult<Manifest> {
        let content = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, JsonEntry> =
            serde_json::from_str(&content).map_err(|source| ManifestError::ManifestFormat {
                path: path.to_path_buf(),
                source,
            })?;

        let mut manifest = Manifest::new();
        for (key, entry) in entries {
            let primary = ArtifactRef::new(entry.class_name, PathBuf::from(entry.python_path));
            let dependencies = entry.dependencies.into_iter().map(Into::into).collect();
            // keys of a JSON object read into a map are already unique
            let _ = manifest.insert(key, ManifestEntry::new(primary, dependencies));
        }
        Ok(manifest)
    }

    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()> {
        let entries: BTreeMap<&str, JsonEntry> = manifest
            .entries()
            .map(|(key, entry)| {
                let primary = JsonArtifact::from(entry.primary());
                let json = JsonEntry {
                    class_name: primary.class_name,
                    python_path: primary.python_path,
                    dependencies: entry.dependencies().iter().map(Into::into).collect(),
                };
                (key, json)
            })
            .collect();

        let mut content =
            serde_json::to_string_pretty(&entries).map_err(|source| ManifestError::ManifestFormat {
                path: path.to_path_buf(),
                source,
            })?;
        content.push('\n');

        atomic_write(path, content.as_bytes())?;
        tracing::debug!("wrote {} manifest entries to {}", manifest.len(), path.display());
        Ok(())
    }
}

//! Manifest builder
//!
//! Folds compilation results into a [`Manifest`] on the orchestrating thread
//! and persists it once the whole batch is done. Artifact paths are stored
//! relative to the output directory.

use std::path::{Component, Path, PathBuf};

use crate::domain::entities::{ArtifactRecord, ArtifactRef, CompiledArtifact, Manifest, ManifestEntry};
use crate::domain::ports::{CompileJobError, ManifestRepository};
use crate::error::{ManifestError, ManifestResult};

use super::dispatcher::JobResult;

/// A definition left out of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDefinition {
    pub key: String,
    pub path: PathBuf,
    pub error: String,
}

/// What happened to one recorded result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// Entry added under this key
    Added(String),
    /// Definition omitted
    Failed(FailedDefinition),
}

/// Summary of a finished build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub entries: usize,
    pub failures: Vec<FailedDefinition>,
}

/// Accumulates compilation results into a manifest
#[derive(Debug)]
pub struct ManifestBuilder {
    library_root: PathBuf,
    output_dir: PathBuf,
    manifest: Manifest,
    failures: Vec<FailedDefinition>,
}

impl ManifestBuilder {
    /// `library_root` is the compiler's working directory; relative artifact
    /// paths in its output are resolved against it.
    pub fn new(library_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
            output_dir: normalize(&output_dir.into()),
            manifest: Manifest::new(),
            failures: Vec::new(),
        }
    }

    /// Fold one job result into the manifest
    ///
    /// A job failure is recorded and returned as [`Recorded::Failed`]. A key
    /// that is already present is a fatal [`ManifestError::DuplicateDefinition`].
    pub fn record(&mut self, result: JobResult) -> ManifestResult<Recorded> {
        let JobResult {
            definition,
            outcome,
        } = result;
        let key = definition.key().to_string();

        if self.manifest.contains(&key) {
            return Err(ManifestError::DuplicateDefinition { key });
        }

        let entry = outcome.and_then(|artifact| self.entry_for(&artifact));
        match entry {
            Ok(entry) => {
                self.manifest
                    .insert(key.clone(), entry)
                    .map_err(|dup| ManifestError::DuplicateDefinition { key: dup.0 })?;
                Ok(Recorded::Added(key))
            }
            Err(err) => {
                let failed = FailedDefinition {
                    key,
                    path: definition.path().to_path_buf(),
                    error: err.to_string(),
                };
                self.failures.push(failed.clone());
                Ok(Recorded::Failed(failed))
            }
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn failures(&self) -> &[FailedDefinition] {
        &self.failures
    }

    /// Write the manifest, replacing any previous one
    pub fn persist<R: ManifestRepository>(
        self,
        repository: &R,
        path: &Path,
    ) -> ManifestResult<BuildSummary> {
        repository.save(&self.manifest, path)?;
        Ok(BuildSummary {
            entries: self.manifest.len(),
            failures: self.failures,
        })
    }

    fn entry_for(&self, artifact: &CompiledArtifact) -> Result<ManifestEntry, CompileJobError> {
        let primary = self.artifact_ref(artifact.primary())?;
        let dependencies = artifact
            .dependencies()
            .iter()
            .map(|record| self.artifact_ref(record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ManifestEntry::new(primary, dependencies))
    }

    fn artifact_ref(&self, record: &ArtifactRecord) -> Result<ArtifactRef, CompileJobError> {
        let absolute = normalize(&self.library_root.join(record.path()));
        let relative = absolute
            .strip_prefix(&self.output_dir)
            .map_err(|_| CompileJobError::OutsideOutputDir {
                path: record.path().to_path_buf(),
                output_dir: self.output_dir.clone(),
            })?;
        Ok(ArtifactRef::new(record.symbol(), relative))
    }
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

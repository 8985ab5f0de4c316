//! Rebuild Use Case
//!
//! Orchestrates the rebuild flow:
//! 1. Discover definitions and drop license-excluded ones
//! 2. Decide whether the manifest is stale
//! 3. Check that the compiler is installed
//! 4. Compile eligible definitions in parallel
//! 5. Fold results into a new manifest and replace the old one
//!
//! Everything except step 4 runs on the calling thread.

use std::sync::Arc;

use crate::application::dispatcher::CompilationDispatcher;
use crate::application::license_filter::LicenseFilter;
use crate::application::manifest_builder::{BuildSummary, ManifestBuilder, Recorded};
use crate::application::staleness::StalenessOracle;
use crate::config::Config;
use crate::domain::entities::Definition;
use crate::domain::ports::{DefinitionCompiler, HistoryOracle, ManifestRepository, ProgressReporter};
use crate::error::ManifestResult;
use crate::infrastructure::fs::discover_definitions;

use super::result::RebuildReport;

/// Rebuild use case - parameterized by its ports
pub struct RebuildUseCase<C, H, R>
where
    C: DefinitionCompiler + 'static,
    H: HistoryOracle,
    R: ManifestRepository,
{
    config: Config,
    compiler: Arc<C>,
    history: H,
    repository: R,
}

impl<C, H, R> RebuildUseCase<C, H, R>
where
    C: DefinitionCompiler + 'static,
    H: HistoryOracle,
    R: ManifestRepository,
{
    pub fn new(config: Config, compiler: Arc<C>, history: H, repository: R) -> Self {
        Self {
            config,
            compiler,
            history,
            repository,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuild the manifest if it is stale (or unconditionally with `force`)
    pub fn execute(
        &self,
        force: bool,
        progress: &mut dyn ProgressReporter,
    ) -> ManifestResult<RebuildReport> {
        let definitions = discover_definitions(&self.config.library_root)?;
        let discovered = definitions.len();

        let exclusions = LicenseFilter::new(&self.config.exclude_licenses).scan(&definitions);
        for path in exclusions.iter() {
            tracing::debug!("excluded by license: {}", path.display());
        }
        let eligible: Vec<Definition> = definitions
            .into_iter()
            .filter(|d| !exclusions.contains(d.path()))
            .collect();

        let manifest_path = self.config.manifest_path();
        let staleness = StalenessOracle::new(&self.history, &self.repository).check(
            force,
            &eligible,
            &manifest_path,
        )?;

        if !staleness.needs_rebuild() {
            tracing::info!("{} is up to date", manifest_path.display());
            let existing_entries = match self.repository.load(&manifest_path) {
                Ok(manifest) => Some(manifest.len()),
                Err(err) => {
                    tracing::warn!("cannot read {}: {}", manifest_path.display(), err);
                    None
                }
            };
            return Ok(RebuildReport {
                staleness,
                discovered,
                excluded: exclusions.len(),
                existing_entries,
                build: None,
            });
        }
        tracing::info!("rebuilding {}: {}", manifest_path.display(), staleness);

        self.compiler.ensure_available()?;

        if !exclusions.is_empty() {
            progress.annotate(&format!(
                "Excluding {} license-restricted definitions from compilation",
                exclusions.len()
            ));
        }

        let build = self.rebuild_from(eligible, progress)?;
        Ok(RebuildReport {
            staleness,
            discovered,
            excluded: exclusions.len(),
            existing_entries: None,
            build: Some(build),
        })
    }

    /// Compile `definitions` and replace the manifest with the result
    ///
    /// Nothing is written if two definitions share a manifest key.
    pub fn rebuild_from(
        &self,
        definitions: Vec<Definition>,
        progress: &mut dyn ProgressReporter,
    ) -> ManifestResult<BuildSummary> {
        let dispatcher =
            CompilationDispatcher::new(Arc::clone(&self.compiler), self.config.worker_count());
        let mut builder = ManifestBuilder::new(&self.config.library_root, &self.config.output_dir);

        tracing::debug!(
            "compiling {} definitions with {} ({} workers)",
            definitions.len(),
            self.compiler.name(),
            dispatcher.workers()
        );
        progress.start("Compiling the format library", definitions.len() as u64);

        let compiler = self.compiler.name();
        let dispatched = dispatcher.dispatch(
            definitions,
            &self.config.output_dir,
            |result| -> ManifestResult<()> {
                progress.advance(1);
                let name = result.definition.file_name();
                match builder.record(result)? {
                    Recorded::Added(_) => progress.annotate(&format!("Compiled {name}")),
                    Recorded::Failed(failed) => {
                        tracing::warn!(
                            "{} failed to compile {}: {}",
                            compiler,
                            failed.path.display(),
                            failed.error
                        );
                        progress.annotate(&format!(
                            "Warning: Failed to compile {}: {}",
                            failed.path.display(),
                            failed.error
                        ));
                    }
                }
                Ok(())
            },
        );
        progress.finish();
        dispatched?;

        builder.persist(&self.repository, &self.config.manifest_path())
    }
}

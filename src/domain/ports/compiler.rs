//! DefinitionCompiler port - the external format compiler
//!
//! Implementations must be shareable across worker threads: one instance
//! serves every compilation job of a rebuild.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{ArtifactParseError, CompiledArtifact};
use crate::error::ManifestResult;

/// Failure of a single compilation job
///
/// These never abort a rebuild; the definition is left out of the manifest.
#[derive(Error, Debug)]
pub enum CompileJobError {
    #[error("failed to start compiler: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("compiler exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error(transparent)]
    MalformedOutput(#[from] ArtifactParseError),

    #[error("artifact {path} is outside the output directory {output_dir}")]
    OutsideOutputDir { path: PathBuf, output_dir: PathBuf },

    #[error("compilation job panicked: {0}")]
    Panicked(String),
}

/// Abstract external compiler
pub trait DefinitionCompiler: Send + Sync {
    /// Name shown in diagnostics
    fn name(&self) -> &str;

    /// Fail with `CompilerUnavailable` if the compiler cannot be used
    fn ensure_available(&self) -> ManifestResult<()>;

    /// Compile one definition into `output_dir`
    fn compile(&self, definition: &Path, output_dir: &Path)
        -> Result<CompiledArtifact, CompileJobError>;
}

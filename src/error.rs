//! Error types for ksy-manifest
//!
//! Uses `thiserror` for library errors. Only the fatal variants of
//! [`ManifestError`] ever reach the binary; per-file and per-job failures are
//! contained where they happen and surface as diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Main error type for manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The external compiler could not be run (missing or broken install)
    #[error("the format compiler is not available ({program}): {reason}")]
    CompilerUnavailable { program: String, reason: String },

    /// Two definitions resolved to the same manifest key
    #[error("{key} appears twice in the format library")]
    DuplicateDefinition { key: String },

    /// Format library root does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Manifest could not be serialized or deserialized
    #[error("invalid manifest {path}: {source}")]
    ManifestFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ManifestError {
    /// Whether this error means the compiler toolchain is missing
    pub fn is_compiler_unavailable(&self) -> bool {
        matches!(self, ManifestError::CompilerUnavailable { .. })
    }
}

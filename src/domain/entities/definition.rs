//! Definition entity - one `.ksy` file in the format library

use std::path::{Path, PathBuf};

/// File extension of format definitions
pub const DEFINITION_EXTENSION: &str = "ksy";

/// Normalize a relative path into a manifest key (always forward slashes).
pub(crate) fn normalize_manifest_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A format definition source file
///
/// The manifest key is the file's path relative to the format library root.
/// License and modification time are derived on demand by the services that
/// need them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Definition {
    path: PathBuf,
    key: String,
}

impl Definition {
    /// Create a definition for `path` inside `library_root`
    ///
    /// Paths outside the library keep their full path as key.
    pub fn new(library_root: &Path, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = match path.strip_prefix(library_root) {
            Ok(relative) => normalize_manifest_key(relative),
            Err(_) => normalize_manifest_key(&path),
        };
        Self { path, key }
    }

    /// Create a definition with an explicit manifest key
    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Manifest key (path relative to the library root)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.key.clone())
    }
}

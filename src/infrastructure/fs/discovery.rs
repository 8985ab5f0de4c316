//! Definition discovery
//!
//! Recursively enumerates `*.ksy` files below the format library root.

use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::entities::{Definition, DEFINITION_EXTENSION};
use crate::error::{ManifestError, ManifestResult};

/// Find every definition under `root`, sorted by path
///
/// Unreadable directory entries are logged and skipped.
pub fn discover_definitions(root: &Path) -> ManifestResult<Vec<Definition>> {
    if !root.is_dir() {
        return Err(ManifestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut definitions = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        let is_definition = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == DEFINITION_EXTENSION);
        if is_file && is_definition {
            definitions.push(Definition::new(root, entry.into_path()));
        }
    }

    tracing::debug!(
        "found {} definitions under {}",
        definitions.len(),
        root.display()
    );
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_nested_definitions_sorted() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("image")).unwrap();
        fs::create_dir_all(root.join("archive")).unwrap();
        fs::write(root.join("image/png.ksy"), "meta: {}").unwrap();
        fs::write(root.join("archive/zip.ksy"), "meta: {}").unwrap();
        fs::write(root.join("README.md"), "# formats").unwrap();

        let keys: Vec<String> = discover_definitions(root)
            .unwrap()
            .iter()
            .map(|d| d.key().to_string())
            .collect();

        assert_eq!(keys, vec!["archive/zip.ksy", "image/png.ksy"]);
    }

    #[test]
    fn skips_git_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/objects/stray.ksy"), "meta: {}").unwrap();
        fs::write(root.join("bmp.ksy"), "meta: {}").unwrap();

        let definitions = discover_definitions(root).unwrap();

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].key(), "bmp.ksy");
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = discover_definitions(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ManifestError::DirectoryNotFound { .. }));
    }
}

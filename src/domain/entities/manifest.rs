//! Manifest entity - maps each definition to the parsers generated for it
//!
//! It's a pure data structure - I/O operations are handled by ManifestRepository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Artifact reference stored in the manifest (path relative to the output directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    symbol: String,
    path: PathBuf,
}

impl ArtifactRef {
    pub fn new(symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            symbol: symbol.into(),
            path: path.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Manifest entry for one definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    primary: ArtifactRef,
    dependencies: Vec<ArtifactRef>,
}

impl ManifestEntry {
    pub fn new(primary: ArtifactRef, dependencies: Vec<ArtifactRef>) -> Self {
        Self {
            primary,
            dependencies,
        }
    }

    pub fn primary(&self) -> &ArtifactRef {
        &self.primary
    }

    pub fn dependencies(&self) -> &[ArtifactRef] {
        &self.dependencies
    }
}

/// A key was inserted twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey(pub String);

/// The manifest itself
///
/// Keys are definition paths relative to the format library root. Entries are
/// kept sorted so the serialized form does not depend on job completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; a key may only ever be inserted once
    pub fn insert(&mut self, key: impl Into<String>, entry: ManifestEntry) -> Result<(), DuplicateKey> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(DuplicateKey(key));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str) -> ManifestEntry {
        ManifestEntry::new(ArtifactRef::new(symbol, format!("{symbol}.py")), vec![])
    }

    #[test]
    fn insert_and_get() {
        let mut manifest = Manifest::new();
        manifest.insert("image/png.ksy", entry("png")).unwrap();

        assert_eq!(manifest.len(), 1);
        assert!(manifest.contains("image/png.ksy"));
        assert_eq!(
            manifest.get("image/png.ksy").unwrap().primary().path(),
            Path::new("png.py")
        );
    }

    #[test]
    fn duplicate_insert_is_rejected_and_keeps_first() {
        let mut manifest = Manifest::new();
        manifest.insert("a.ksy", entry("first")).unwrap();

        let err = manifest.insert("a.ksy", entry("second")).unwrap_err();

        assert_eq!(err, DuplicateKey("a.ksy".to_string()));
        assert_eq!(manifest.get("a.ksy").unwrap().primary().symbol(), "first");
    }

    #[test]
    fn entries_are_sorted_by_key() {
        let mut manifest = Manifest::new();
        manifest.insert("z.ksy", entry("z")).unwrap();
        manifest.insert("a.ksy", entry("a")).unwrap();

        let keys: Vec<_> = manifest.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a.ksy", "z.ksy"]);
    }
}

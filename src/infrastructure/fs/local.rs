//! Local file system helpers
//!
//! Atomic replacement and modification times for files on local disk.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Modification time of a file as UTC
pub fn modified_time(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

/// Write content to a file atomically
///
/// The content goes to a temporary file in the destination directory which
/// is then renamed over `path`. On failure the previous file is untouched.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        atomic_write(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn atomic_write_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        fs::write(&path, "Original").unwrap();
        atomic_write(&path, b"Replaced").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Replaced");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("manifest.json");

        atomic_write(&path, b"{}").unwrap();

        assert!(path.exists());
        // no temp files left behind
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn modified_time_of_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(modified_time(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn modified_time_is_recent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.ksy");
        fs::write(&path, "meta: {}").unwrap();

        let modified = modified_time(&path).unwrap();
        let age = Utc::now() - modified;
        assert!(age.num_seconds().abs() < 60);
    }
}

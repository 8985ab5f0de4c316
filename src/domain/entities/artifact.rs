//! Compiled artifact entity
//!
//! The external compiler reports what it generated as tab-separated lines:
//!
//! ```text
//! <symbolic name>\t<artifact path>[\t...]
//! ```
//!
//! The first non-blank line is the primary artifact of the compiled
//! definition, every following line is a dependency it pulled in.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Compiler output that does not follow the record format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactParseError {
    #[error("compiler reported no artifacts")]
    Empty,

    #[error("compiler output is not valid UTF-8 (byte {offset})")]
    NotUtf8 { offset: usize },

    #[error("malformed compiler output on line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// One generated artifact: symbolic name plus the file it was written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    symbol: String,
    path: PathBuf,
}

impl ArtifactRecord {
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

/// Result of compiling one definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    primary: ArtifactRecord,
    dependencies: Vec<ArtifactRecord>,
}

impl CompiledArtifact {
    pub fn new(primary: ArtifactRecord, dependencies: Vec<ArtifactRecord>) -> Self {
        Self {
            primary,
            dependencies,
        }
    }

    /// Parse the compiler's stdout
    pub fn parse(output: &str) -> Result<Self, ArtifactParseError> {
        let mut records = Vec::new();

        for (index, line) in output.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let symbol = fields.next().unwrap_or_default().trim();
            let path = fields.next().map(str::trim).unwrap_or_default();
            if symbol.is_empty() || path.is_empty() {
                return Err(ArtifactParseError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
            }
            records.push(ArtifactRecord::new(symbol, path));
        }

        let mut records = records.into_iter();
        let primary = records.next().ok_or(ArtifactParseError::Empty)?;
        Ok(Self::new(primary, records.collect()))
    }

    pub fn primary(&self) -> &ArtifactRecord {
        &self.primary
    }

    pub fn dependencies(&self) -> &[ArtifactRecord] {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primary_and_dependencies() {
        let output = "Png\t/out/png.py\nZlib\t/out/zlib.py\textra\n";
        let artifact = CompiledArtifact::parse(output).unwrap();

        assert_eq!(artifact.primary().symbol(), "Png");
        assert_eq!(artifact.primary().path(), Path::new("/out/png.py"));
        assert_eq!(artifact.dependencies().len(), 1);
        assert_eq!(artifact.dependencies()[0].symbol(), "Zlib");
    }

    #[test]
    fn parse_skips_blank_lines() {
        let output = "\n   \nGif\t/out/gif.py\r\n\n";
        let artifact = CompiledArtifact::parse(output).unwrap();

        assert_eq!(artifact.primary().symbol(), "Gif");
        assert_eq!(artifact.primary().path(), Path::new("/out/gif.py"));
        assert!(artifact.dependencies().is_empty());
    }

    #[test]
    fn parse_empty_output_fails() {
        assert_eq!(
            CompiledArtifact::parse("\n\n").unwrap_err(),
            ArtifactParseError::Empty
        );
    }

    #[test]
    fn parse_line_without_path_fails() {
        let err = CompiledArtifact::parse("Png\t/out/png.py\nwarning: something\n").unwrap_err();
        assert_eq!(
            err,
            ArtifactParseError::MalformedLine {
                line: 2,
                content: "warning: something".to_string(),
            }
        );
    }
}

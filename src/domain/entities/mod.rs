//! Domain Entities
//!
//! - `Definition` - A `.ksy` file from the format library
//! - `CompiledArtifact` - What the compiler generated for one definition
//! - `Manifest` - Maps definitions to their generated parsers

mod artifact;
mod definition;
mod manifest;

pub use artifact::{ArtifactParseError, ArtifactRecord, CompiledArtifact};
pub(crate) use definition::normalize_manifest_key;
pub use definition::{Definition, DEFINITION_EXTENSION};
pub use manifest::{ArtifactRef, DuplicateKey, Manifest, ManifestEntry};

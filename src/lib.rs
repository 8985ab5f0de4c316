//! ksy-manifest - incremental compiler driver for Kaitai Struct format libraries
//!
//! Compiles every license-eligible `.ksy` definition of a format library with
//! an external compiler, in parallel, and records the generated parsers in a
//! JSON manifest. Nothing is compiled while the manifest is newer than every
//! eligible definition.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{RebuildReport, RebuildUseCase};
pub use config::Config;
pub use domain::entities::{Definition, Manifest};
pub use domain::services::Staleness;
pub use error::{ManifestError, ManifestResult};
pub use infrastructure::{ExternalCompiler, GitHistory, JsonManifestRepository};

//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Definition discovery, timestamps, atomic writes
//! - `repositories/` - Manifest persistence (JSON)
//! - `vcs/` - Git-backed history oracle
//! - `compiler/` - External compiler process

pub mod compiler;
pub mod fs;
pub mod repositories;
pub mod vcs;

// Re-export for convenience
pub use compiler::ExternalCompiler;
pub use repositories::JsonManifestRepository;
pub use vcs::GitHistory;

//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compiler;
pub mod history_oracle;
pub mod manifest_repository;
pub mod progress;

pub use compiler::{CompileJobError, DefinitionCompiler};
pub use history_oracle::{HistoryError, HistoryOracle, HistoryResult};
pub use manifest_repository::ManifestRepository;
pub use progress::{NoopProgress, ProgressReporter};

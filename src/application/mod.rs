//! Application Layer
//!
//! Use cases that orchestrate the rebuild flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `RebuildUseCase` - Discover, filter, check staleness, compile, persist
//!
//! ## Services
//!
//! - `LicenseFilter` - Finds definitions excluded by license
//! - `StalenessOracle` - Decides whether the manifest is out of date
//! - `CompilationDispatcher` - Runs compiler jobs on a worker pool
//! - `ManifestBuilder` - Folds job results into the manifest

pub mod dispatcher;
pub mod license_filter;
pub mod manifest_builder;
pub mod rebuild;
pub mod staleness;

pub use dispatcher::{CompilationDispatcher, JobResult};
pub use license_filter::{ExclusionSet, LicenseFilter};
pub use manifest_builder::{BuildSummary, FailedDefinition, ManifestBuilder, Recorded};
pub use rebuild::{RebuildReport, RebuildUseCase};
pub use staleness::StalenessOracle;

//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod license_policy;
mod staleness;

pub use license_policy::{declared_license, DeclaredLicense};
pub use staleness::Staleness;

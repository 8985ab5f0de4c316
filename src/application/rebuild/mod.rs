//! Rebuild Use Case Module
//!
//! Brings the parser manifest up to date with the format library.

mod result;
mod use_case;

pub use result::RebuildReport;
pub use use_case::RebuildUseCase;

//! File System Helpers
//!
//! Definition discovery and the local file operations the repositories use.

mod discovery;
mod local;

pub use discovery::discover_definitions;
pub use local::{atomic_write, modified_time};

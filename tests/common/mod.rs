//! Common test utilities for ksy-manifest CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated format library, output directory and config home
//! - Fixtures: a shell-script stand-in for the format compiler

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;

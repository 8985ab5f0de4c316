//! Configuration module for ksy-manifest
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KSY_*)
//! 3. `KSY_CONFIG` or project config (`./ksy-manifest.toml`)
//! 4. User config (`~/.config/ksy-manifest/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use loader::{
    apply_env_overrides, load_or_default, load_with_warnings, ConfigWarning, LoadedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{CompilerConfig, Config, DEFAULT_EXCLUDE_LICENSES};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: String, value: String },
}

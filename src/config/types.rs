//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigWarning};
use super::ConfigError;

/// Copyleft license fragments excluded from compilation by default
pub const DEFAULT_EXCLUDE_LICENSES: &[&str] =
    &["AGPL", "EUPL", "GPL", "LGPL", "OSL", "ODbL", "Ms-RL", "GFDL"];

/// External compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Executable to run
    #[serde(default = "default_compiler_program")]
    pub program: String,

    /// Optional script passed as the first argument (e.g. a Python wrapper)
    #[serde(default = "default_compiler_script")]
    pub script: Option<PathBuf>,

    /// Arguments used to check that the compiler is installed
    #[serde(default = "default_probe_args")]
    pub probe_args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler_program(),
            script: default_compiler_script(),
            probe_args: default_probe_args(),
        }
    }
}

fn default_compiler_program() -> String {
    "python3".to_string()
}

fn default_compiler_script() -> Option<PathBuf> {
    Some(PathBuf::from("polyfile/kaitai/compiler.py"))
}

fn default_probe_args() -> Vec<String> {
    vec!["--install".to_string()]
}

fn default_library_root() -> PathBuf {
    PathBuf::from("kaitai_struct_formats")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("polyfile/kaitai/parsers")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_exclude_licenses() -> Vec<String> {
    DEFAULT_EXCLUDE_LICENSES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Main configuration structure
///
/// Every component receives the paths and lists it needs from this value;
/// nothing is read from process-wide state after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the format library (`*.ksy` files live below it)
    #[serde(default = "default_library_root")]
    pub library_root: PathBuf,

    /// Directory the compiler writes generated parsers into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Manifest file, relative to `output_dir` unless absolute
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// License-name fragments whose presence excludes a definition
    #[serde(default = "default_exclude_licenses")]
    pub exclude_licenses: Vec<String>,

    /// Worker count for compilation (0 = number of processors)
    #[serde(default)]
    pub jobs: usize,

    #[serde(default)]
    pub compiler: CompilerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_root: default_library_root(),
            output_dir: default_output_dir(),
            manifest: default_manifest(),
            exclude_licenses: default_exclude_licenses(),
            jobs: 0,
            compiler: CompilerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest)
    }

    /// Number of compilation workers to use
    pub fn worker_count(&self) -> usize {
        if self.jobs > 0 {
            return self.jobs;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Resolve every relative path against `base`
    ///
    /// The compiler runs with the library root as its working directory, so
    /// paths handed to it must not depend on the caller's directory.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.library_root = absolutize(base, &self.library_root);
        self.output_dir = absolutize(base, &self.output_dir);
        self.compiler.script = self
            .compiler
            .script
            .take()
            .filter(|script| !script.as_os_str().is_empty())
            .map(|script| absolutize(base, &script));
        if self.compiler.program.contains('/') {
            let program = absolutize(base, Path::new(&self.compiler.program));
            self.compiler.program = program.to_string_lossy().into_owned();
        }
        self
    }
}

pub(super) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

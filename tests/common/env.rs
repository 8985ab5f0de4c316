//! Test environment builder for isolated ksy-manifest runs.
//!
//! Provides `TestEnv` - a temp directory holding the format library, the
//! output directory and the fake compiler, plus helpers to run the CLI
//! against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use super::fixtures::FAKE_COMPILER;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment.
///
/// Layout inside the temp directory:
/// - `formats/` - format library
/// - `parsers/` - output directory (manifest lands here)
/// - `ksc.sh` - fake compiler
/// - `config/` - empty config home, so no user config leaks in
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("formats")).expect("Failed to create library");
        fs::create_dir_all(root.path().join("config")).expect("Failed to create config home");
        fs::write(root.path().join("ksc.sh"), FAKE_COMPILER).expect("Failed to write compiler");
        Self {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_ksy-manifest")),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path("parsers/manifest.json")
    }

    /// Write a definition into the library, dated an hour ago
    pub fn write_definition(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path("formats").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write definition");
        set_age(&path, Duration::from_secs(3600));
        path
    }

    /// Read the manifest as JSON
    pub fn read_manifest(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.manifest_path()).expect("Failed to read manifest");
        serde_json::from_str(&content).expect("Manifest is not valid JSON")
    }

    /// Definitions the fake compiler was invoked on, in call order
    pub fn compiler_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn clear_compiler_calls(&self) {
        let _ = fs::remove_file(self.path("calls.log"));
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run the CLI from the temp root; `env_vars` override the defaults
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env_remove("KSY_CONFIG")
            .env_remove("KSY_MANIFEST")
            .env_remove("KSY_EXCLUDE_LICENSES")
            .env_remove("KSY_JOBS")
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("HOME", self.path("config"))
            .env("GIT_CEILING_DIRECTORIES", ceiling(self.root.path()))
            .env("KSY_LOG", "warn")
            .env("KSY_LIBRARY_ROOT", self.path("formats"))
            .env("KSY_OUTPUT_DIR", self.path("parsers"))
            .env("KSY_COMPILER", "/bin/sh")
            .env("KSY_COMPILER_SCRIPT", self.path("ksc.sh"));

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute ksy-manifest");
        output_to_result(output)
    }
}

/// Backdate a file's modification time
pub fn set_age(path: &Path, age: Duration) {
    fs::OpenOptions::new()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(SystemTime::now() - age))
        .expect("Failed to set mtime");
}

fn ceiling(root: &Path) -> PathBuf {
    root.parent().unwrap_or(root).to_path_buf()
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

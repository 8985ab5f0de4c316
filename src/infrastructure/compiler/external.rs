//! External format compiler
//!
//! Implements the DefinitionCompiler port by running a compiler executable
//! (optionally through a wrapper script) once per definition:
//!
//! ```text
//! <program> [script] <definition> <output-dir>
//! ```
//!
//! The process runs with the format library root as working directory and
//! reports generated artifacts on stdout, one tab-separated record per line.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::domain::entities::{ArtifactParseError, CompiledArtifact};
use crate::domain::ports::{CompileJobError, DefinitionCompiler};
use crate::error::{ManifestError, ManifestResult};

/// Compiler invoked as a child process
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    program: String,
    script: Option<PathBuf>,
    probe_args: Vec<String>,
    work_dir: PathBuf,
}

impl ExternalCompiler {
    pub fn new(program: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: None,
            probe_args: vec!["--version".to_string()],
            work_dir: work_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.compiler.program.clone(),
            script: config.compiler.script.clone(),
            probe_args: config.compiler.probe_args.clone(),
            work_dir: config.library_root.clone(),
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_probe_args(mut self, args: Vec<String>) -> Self {
        self.probe_args = args;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(script) = &self.script {
            cmd.arg(script);
        }
        cmd
    }
}

impl DefinitionCompiler for ExternalCompiler {
    fn name(&self) -> &str {
        &self.program
    }

    fn ensure_available(&self) -> ManifestResult<()> {
        let unavailable = |reason: String| ManifestError::CompilerUnavailable {
            program: self.program.clone(),
            reason,
        };

        let output = self
            .command()
            .args(&self.probe_args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| unavailable(e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            format!("probe {}", output.status)
        } else {
            format!("probe {}: {}", output.status, stderr)
        };
        Err(unavailable(reason))
    }

    fn compile(
        &self,
        definition: &Path,
        output_dir: &Path,
    ) -> Result<CompiledArtifact, CompileJobError> {
        let output = self
            .command()
            .arg(definition)
            .arg(output_dir)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(CompileJobError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|e| ArtifactParseError::NotUtf8 {
                offset: e.utf8_error().valid_up_to(),
            })?;
        Ok(CompiledArtifact::parse(&stdout)?)
    }
}

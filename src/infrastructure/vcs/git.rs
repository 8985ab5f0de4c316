//! Git history oracle
//!
//! Implements the HistoryOracle port by shelling out to `git`. Only
//! read-only subcommands are used.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::{DateTime, Utc};

use crate::domain::ports::{HistoryError, HistoryOracle, HistoryResult};

const GIT: &str = "git";

/// History oracle backed by a git work tree
#[derive(Debug, Clone)]
pub struct GitHistory {
    /// Directory the queries run in (the format library root)
    work_dir: PathBuf,
}

impl GitHistory {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn run(&self, args: &[&str], path: &Path) -> HistoryResult<String> {
        let output: Output = Command::new(GIT)
            .args(args)
            .arg("--")
            .arg(path)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|source| HistoryError::Unavailable {
                tool: GIT.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(HistoryError::QueryFailed {
                tool: GIT.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HistoryOracle for GitHistory {
    fn is_modified(&self, path: &Path) -> HistoryResult<bool> {
        // staged, unstaged and untracked changes all show up here
        let status = self.run(&["status", "--porcelain"], path)?;
        Ok(!status.trim().is_empty())
    }

    fn last_snapshot_time(&self, path: &Path) -> HistoryResult<Option<DateTime<Utc>>> {
        let log = self.run(&["log", "-1", "--format=%cI"], path)?;
        parse_commit_time(&log)
    }
}

/// Parse `git log --format=%cI` output (strict ISO 8601)
pub(crate) fn parse_commit_time(output: &str) -> HistoryResult<Option<DateTime<Utc>>> {
    let value = output.trim();
    if value.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|time| Some(time.with_timezone(&Utc)))
        .map_err(|e| HistoryError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}

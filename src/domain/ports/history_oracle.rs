//! HistoryOracle port - read-only questions to version control
//!
//! Staleness checks only need two answers per file: whether it has
//! uncommitted changes, and when it was last recorded. Keeping this behind a
//! trait lets tests substitute a fake instead of running `git`.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for history queries
pub type HistoryResult<T> = Result<T, HistoryError>;

/// History query errors
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The version-control tool could not be started
    #[error("failed to run {tool}: {source}")]
    Unavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but rejected the query (e.g. not a repository)
    #[error("{tool} query failed: {message}")]
    QueryFailed { tool: String, message: String },

    /// The tool returned a timestamp we could not read
    #[error("unreadable timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
}

/// Read-only view of a file's version history
pub trait HistoryOracle {
    /// Does the file differ from the last recorded snapshot?
    ///
    /// Files that were never recorded count as modified.
    fn is_modified(&self, path: &Path) -> HistoryResult<bool>;

    /// Time of the last recorded snapshot touching the file, if any
    fn last_snapshot_time(&self, path: &Path) -> HistoryResult<Option<DateTime<Utc>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_error_display() {
        let err = HistoryError::QueryFailed {
            tool: "git".to_string(),
            message: "not a git repository".to_string(),
        };
        assert_eq!(err.to_string(), "git query failed: not a git repository");
    }
}

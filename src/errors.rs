//! Error type shared by the loading, cleaning and persistence stages.
//!
//! Each variant corresponds to one failure category of a cleaning run:
//! malformed input, data-integrity violations, configuration problems and
//! plain I/O failures. Per-row degradations (such as an unparseable URL) are
//! not errors and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for a cleaning run.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("I/O failure on '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed CSV in '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("line {line} of '{}' has {found} fields, header declares {expected}", .path.display())]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("required column '{column}' is missing from the input")]
    MissingColumn { column: String },
    #[error("rows {first_row} and {row} share uid {uid} (url '{url}')")]
    DuplicateUid {
        uid: String,
        url: String,
        first_row: usize,
        row: usize,
    },
    #[error("invalid configuration in '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("input path '{}' has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}

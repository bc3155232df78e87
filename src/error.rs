//! Error taxonomy shared by the merge and cleaning pipelines.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Everything that can stop (or, for [`CorpusError::MissingField`], be
/// reported by) a corpus run.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// An expected input file does not exist.
    #[error("missing input file {}", path.display())]
    MissingFile { path: PathBuf },

    /// A file exists but could not be opened, read, or written.
    #[error("cannot access {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line (merge) or a whole file (loader) is not valid JSON.
    #[error("malformed JSON in {}{}", path.display(), line_suffix(*line))]
    MalformedJson {
        path: PathBuf,
        /// 1-based line number, when the failure is tied to a single line.
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON with the wrong shape (e.g. not an array of objects).
    #[error("malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// A document record without a usable text field. Never fatal.
    #[error("record #{index} has no usable `{field}` field")]
    MissingField { index: usize, field: &'static str },

    /// A configuration file could not be parsed.
    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("invalid glob pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no files found matching pattern: {pattern}")]
    NoMatches { pattern: String },

    #[error("cannot start worker pool: {0}")]
    ThreadPool(String),
}

fn line_suffix(line: Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl CorpusError {
    pub(crate) fn access(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Map an `open` failure, distinguishing a missing file from other I/O errors.
    pub(crate) fn open(path: impl AsRef<Path>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::MissingFile {
                path: path.as_ref().to_path_buf(),
            }
        } else {
            Self::access(path, source)
        }
    }

    /// True for errors that a run records and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

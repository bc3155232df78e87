//! Record-level validation policy and error collection.
//!
//! Both pipelines meet bad records: the merge pipeline meets lines that do not
//! parse as JSON, and the loader meets document records without usable text.
//! This module decides what happens to them.
//!
//! - [`ValidationMode`] chooses between failing fast, skipping silently, or
//!   skipping while recording each rejection
//! - [`ErrorCollector`] accumulates [`RecordError`]s for the run report
//!
//! # Example
//!
//! ```
//! use ironcorpus::validation::{ErrorCollector, RecordError, ValidationMode};
//!
//! let mode = ValidationMode::LogAndContinue;
//! let mut collector = ErrorCollector::new();
//! if mode.records_errors() {
//!     collector.add(RecordError::at_line("a.json", 3, "expected value"));
//! }
//! assert_eq!(collector.error_count(), 1);
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{CorpusError, Result};

/// Defines how to handle an invalid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Fail immediately on the first invalid record
    #[default]
    #[value(name = "fail-fast")]
    FailFast,
    /// Skip invalid records silently and continue processing
    #[value(name = "skip")]
    #[serde(rename = "skip")]
    SkipInvalid,
    /// Log invalid records to the error collector and continue processing
    #[value(name = "log")]
    #[serde(rename = "log")]
    LogAndContinue,
}

impl ValidationMode {
    pub fn is_fail_fast(self) -> bool {
        self == Self::FailFast
    }

    pub fn records_errors(self) -> bool {
        self == Self::LogAndContinue
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FailFast => "fail-fast",
            Self::SkipInvalid => "skip",
            Self::LogAndContinue => "log",
        };
        f.write_str(name)
    }
}

/// One rejected record with enough context to find it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    /// File the record came from
    pub source: String,
    /// 1-based line number (line-oriented inputs)
    pub line: Option<usize>,
    /// 0-based position in the file (array-oriented inputs)
    pub index: Option<usize>,
    /// Human-readable error message
    pub message: String,
}

impl RecordError {
    pub fn at_line(source: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Self {
            source: source.as_ref().display().to_string(),
            line: Some(line),
            index: None,
            message: message.into(),
        }
    }

    pub fn at_index(source: impl AsRef<Path>, index: usize, message: impl Into<String>) -> Self {
        Self {
            source: source.as_ref().display().to_string(),
            line: None,
            index: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Collects record errors for batch reporting.
///
/// Use this to accumulate errors when using [`ValidationMode::LogAndContinue`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorCollector {
    errors: Vec<RecordError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: RecordError) {
        self.errors.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RecordError] {
        &self.errors
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Export errors as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.errors)
    }

    /// Write errors to a file in JSON format.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json().map_err(|source| CorpusError::MalformedJson {
            path: path.to_path_buf(),
            line: None,
            source,
        })?;
        std::fs::write(path, json).map_err(|e| CorpusError::access(path, e))
    }
}

impl fmt::Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCollector({} errors)", self.error_count())
    }
}

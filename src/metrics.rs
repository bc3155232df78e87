//! Run reports and timing.
//!
//! Each pipeline returns a report struct describing what it did (files,
//! records, lines, rejections, elapsed time). Reports implement [`RunReport`],
//! which logs a one-line summary and can be saved as pretty JSON for later
//! comparison between runs.
//!
//! ```no_run
//! use ironcorpus::config::MergeConfig;
//! use ironcorpus::merge::merge_json_dir;
//! use ironcorpus::metrics::RunReport;
//!
//! # fn main() -> ironcorpus::Result<()> {
//! let report = merge_json_dir(&MergeConfig::default())?;
//! report.log_summary();
//! report.save_to_file("merge-report.json")?;
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{CorpusError, Result};
use crate::io::atomic::write_atomic;

/// A serializable summary of one pipeline run.
pub trait RunReport: Serialize {
    /// Emit the summary as a tracing event.
    fn log_summary(&self);

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Write the report as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if the report cannot be serialized or written.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let mut json =
            serde_json::to_vec_pretty(self).map_err(|source| CorpusError::MalformedJson {
                path: path.to_path_buf(),
                line: None,
                source,
            })?;
        json.push(b'\n');
        write_atomic(path, &json)?;
        Ok(())
    }
}

/// Start/stop timer for a run.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

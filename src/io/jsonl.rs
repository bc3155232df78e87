//! Newline-delimited JSON line copying.
//!
//! [`LineCopier`] concatenates JSONL files. Every line is parsed before it is
//! written, but what lands in the output is the line exactly as it was read:
//! no re-serialization, no key reordering, no whitespace changes. Parsing only
//! decides *whether* the line is written, according to the configured
//! [`ValidationMode`].
//!
//! # Notes
//! - `\n` and `\r\n` both end a line; output lines always end in `\n`.
//! - A final line without a terminator is copied and terminated.
//! - A blank line holds no JSON value and is treated as invalid.
//! - Compressed inputs are decompressed transparently.

use serde::Serialize;
use serde::de::IgnoredAny;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CorpusError, Result};
use crate::io::atomic::AtomicOutput;
use crate::io::compression::auto_detect_reader;
use crate::validation::{ErrorCollector, RecordError, ValidationMode};

/// Files between two progress events.
pub const DEFAULT_PROGRESS_EVERY: usize = 1024;

/// Outcome of a [`LineCopier`] run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineCopyReport {
    pub files: usize,
    pub lines_written: usize,
    pub lines_rejected: usize,
    /// Size of the committed output file.
    pub bytes_written: u64,
    /// Rejected lines; only populated under [`ValidationMode::LogAndContinue`].
    pub rejected: ErrorCollector,
}

/// Copies JSONL files line by line into one output, validating each line.
#[derive(Debug, Clone, Copy)]
pub struct LineCopier {
    mode: ValidationMode,
    progress_every: usize,
}

impl Default for LineCopier {
    fn default() -> Self {
        Self {
            mode: ValidationMode::FailFast,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl LineCopier {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Emit a progress event every `n` files (`0` disables progress events).
    pub fn with_progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Copy every line of `inputs`, in order, into `output`.
    ///
    /// The output is replaced only if the whole copy succeeds.
    ///
    /// # Errors
    /// [`CorpusError::MissingFile`] / [`CorpusError::FileAccess`] for I/O
    /// problems, and [`CorpusError::MalformedJson`] for the first invalid line
    /// under [`ValidationMode::FailFast`].
    pub fn copy_files(&self, inputs: &[PathBuf], output: impl AsRef<Path>) -> Result<LineCopyReport> {
        self.copy_files_with_progress(inputs, output, |_| {})
    }

    /// Like [`copy_files`](Self::copy_files), calling `on_progress` with the
    /// number of files copied so far every `progress_every` files.
    pub fn copy_files_with_progress(
        &self,
        inputs: &[PathBuf],
        output: impl AsRef<Path>,
        mut on_progress: impl FnMut(usize),
    ) -> Result<LineCopyReport> {
        let mut out = AtomicOutput::create(output)?;
        let out_path = out.path().to_path_buf();
        let mut report = LineCopyReport::default();

        for path in inputs {
            self.copy_file(path, &mut out, &out_path, &mut report)?;
            report.files += 1;
            if self.progress_every > 0 && report.files % self.progress_every == 0 {
                info!(files = report.files, "merging");
                on_progress(report.files);
            }
        }

        report.bytes_written = out.commit()?;
        Ok(report)
    }

    /// Append the lines of one file to `out`, updating `report`.
    ///
    /// Read errors name `path`; write errors name `out_path`.
    pub fn copy_file(
        &self,
        path: &Path,
        out: &mut dyn Write,
        out_path: &Path,
        report: &mut LineCopyReport,
    ) -> Result<()> {
        let file = File::open(path).map_err(|e| CorpusError::open(path, e))?;
        let reader = auto_detect_reader(file, path).map_err(|e| CorpusError::access(path, e))?;
        let mut reader = BufReader::new(reader);

        let mut buf = Vec::new();
        let mut line_no = 0usize;
        let (mut written, mut rejected) = (0usize, 0usize);
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| CorpusError::access(path, e))?;
            if n == 0 {
                break;
            }
            line_no += 1;
            let line = strip_terminator(&buf);

            if let Err(source) = serde_json::from_slice::<IgnoredAny>(line) {
                match self.mode {
                    ValidationMode::FailFast => {
                        return Err(CorpusError::MalformedJson {
                            path: path.to_path_buf(),
                            line: Some(line_no),
                            source,
                        });
                    }
                    ValidationMode::SkipInvalid => {}
                    ValidationMode::LogAndContinue => {
                        warn!(file = %path.display(), line = line_no, error = %source, "skipping invalid JSON line");
                        report
                            .rejected
                            .add(RecordError::at_line(path, line_no, source.to_string()));
                    }
                }
                rejected += 1;
                continue;
            }

            out.write_all(line)
                .and_then(|()| out.write_all(b"\n"))
                .map_err(|e| CorpusError::access(out_path, e))?;
            written += 1;
        }

        debug!(file = %path.display(), written, rejected, "copied");
        report.lines_written += written;
        report.lines_rejected += rejected;
        Ok(())
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

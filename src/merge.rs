//! Merge every `*.json` file of a directory into one JSONL file.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::MergeConfig;
use crate::error::Result;
use crate::io::glob::list_json_files;
use crate::io::jsonl::{LineCopier, LineCopyReport};
use crate::metrics::{RunReport, Stopwatch};
use crate::validation::ValidationMode;

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub output: PathBuf,
    pub on_invalid: ValidationMode,
    #[serde(flatten)]
    pub copy: LineCopyReport,
    pub elapsed_ms: u64,
}

impl RunReport for MergeReport {
    fn log_summary(&self) {
        info!(
            output = %self.output.display(),
            files = self.copy.files,
            lines = self.copy.lines_written,
            rejected = self.copy.lines_rejected,
            bytes_written = self.copy.bytes_written,
            elapsed_ms = self.elapsed_ms,
            "merged file"
        );
    }
}

/// Concatenate `<json_path>/*.json` into `output_file`.
///
/// A previous output that sits in the input directory is not merged into
/// itself.
///
/// # Errors
/// Any enumeration or copy error; see [`LineCopier::copy_files`].
pub fn merge_json_dir(config: &MergeConfig) -> Result<MergeReport> {
    let watch = Stopwatch::start();
    let mut files = list_json_files(&config.json_path)?;
    if let Ok(output) = config.output_file.canonicalize() {
        files.retain(|f| f.canonicalize().map_or(true, |f| f != output));
    }
    info!(
        dir = %config.json_path.display(),
        files = files.len(),
        on_invalid = %config.on_invalid,
        "merging"
    );

    let copier = LineCopier::new(config.on_invalid).with_progress_every(config.progress_every);
    let copy = copier.copy_files(&files, &config.output_file)?;

    let report = MergeReport {
        output: config.output_file.clone(),
        on_invalid: config.on_invalid,
        copy,
        elapsed_ms: watch.elapsed_ms(),
    };
    report.log_summary();
    Ok(report)
}

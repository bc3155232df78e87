//! Run configuration for both pipelines.
//!
//! Every setting has a default matching the historical layout of the corpus
//! scripts. A JSON file can override any subset of fields, and command-line
//! flags override the file.
//!
//! ```json
//! {
//!   "input_dir": "data/raw",
//!   "inputs": ["1.json", "2.json"],
//!   "output": "data/clean.txt",
//!   "exec": { "mode": "parallel", "threads": 8 },
//!   "filter": { "special_char_limit": 15, "min_tokens": 3 }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::filter::FilterConfig;
use crate::error::{CorpusError, Result};
use crate::io::jsonl::DEFAULT_PROGRESS_EVERY;
use crate::runner::ExecMode;
use crate::validation::ValidationMode;

/// Settings for `merge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Directory holding the `*.json` inputs.
    pub json_path: PathBuf,
    pub output_file: PathBuf,
    /// What to do with a line that is not valid JSON.
    pub on_invalid: ValidationMode,
    pub progress_every: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("."),
            output_file: PathBuf::from("merged_output.json"),
            on_invalid: ValidationMode::FailFast,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Default numbered inputs: `1.json` through `13.json`.
pub fn default_inputs() -> Vec<String> {
    (1..=13).map(|n| format!("{n}.json")).collect()
}

/// Settings for `clean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    pub input_dir: PathBuf,
    /// File names, resolved against `input_dir`, loaded in this order.
    pub inputs: Vec<String>,
    pub output: PathBuf,
    pub exec: ExecMode,
    pub filter: FilterConfig,
    /// Extra abbreviations for the built-in segmenter.
    pub abbreviations: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("../Data/Original_data"),
            inputs: default_inputs(),
            output: PathBuf::from("../Data/output.txt"),
            exec: ExecMode::default(),
            filter: FilterConfig::default(),
            abbreviations: Vec::new(),
        }
    }
}

impl CleanConfig {
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.inputs.iter().map(|name| self.input_dir.join(name)).collect()
    }
}

/// Read a JSON configuration file; missing fields take their defaults.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| CorpusError::open(path, e))?;
    serde_json::from_str(&raw).map_err(|e| CorpusError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

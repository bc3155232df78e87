use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{CleanConfig, MergeConfig, load_config};
use crate::error::Result;
use crate::runner::ExecMode;
use crate::validation::ValidationMode;

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "ironcorpus",
    version,
    about = "Merge JSONL shards and clean a text corpus into one sentence per line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Increase logging verbosity (-v, -vv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Concatenate every `*.json` file of a directory into one JSONL file.
    Merge(MergeArgs),
    /// Normalize, segment and filter document files into a sentence corpus.
    Clean(CleanArgs),
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Directory containing the newline-delimited `*.json` inputs.
    #[arg(long = "json_path", alias = "json-path", value_name = "DIR", default_value = ".")]
    pub json_path: PathBuf,
    /// Merged output file.
    #[arg(
        long = "output_file",
        alias = "output-file",
        value_name = "PATH",
        default_value = "merged_output.json"
    )]
    pub output_file: PathBuf,
    /// What to do with a line that is not valid JSON.
    #[arg(long, value_enum, default_value_t = ValidationMode::FailFast)]
    pub on_invalid: ValidationMode,
    /// Log progress every N files (0 disables).
    #[arg(long, value_name = "N", default_value_t = crate::io::jsonl::DEFAULT_PROGRESS_EVERY)]
    pub progress_every: usize,
    /// Write the run report as pretty JSON.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl MergeArgs {
    pub fn to_config(&self) -> MergeConfig {
        MergeConfig {
            json_path: self.json_path.clone(),
            output_file: self.output_file.clone(),
            on_invalid: self.on_invalid,
            progress_every: self.progress_every,
        }
    }
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// JSON configuration file; flags given here override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory the input file names are resolved against.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,
    /// Input file names, loaded in the given order.
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub inputs: Vec<String>,
    /// Cleaned corpus destination.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Worker threads for per-document cleaning.
    #[arg(long, value_name = "N", conflicts_with = "sequential")]
    pub threads: Option<usize>,
    /// Clean documents one at a time on the calling thread.
    #[arg(long)]
    pub sequential: bool,
    /// Write the run report as pretty JSON.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl CleanArgs {
    /// Resolve the effective configuration: defaults, then `--config`, then flags.
    ///
    /// # Errors
    /// Returns an error if the configuration file is missing or invalid.
    pub fn to_config(&self) -> Result<CleanConfig> {
        let mut config = match &self.config {
            Some(path) => load_config::<CleanConfig>(path)?,
            None => CleanConfig::default(),
        };
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if !self.inputs.is_empty() {
            config.inputs = self.inputs.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.sequential {
            config.exec = ExecMode::Sequential;
        } else if let Some(threads) = self.threads {
            config.exec = ExecMode::Parallel {
                threads: Some(threads),
            };
        }
        Ok(config)
    }
}

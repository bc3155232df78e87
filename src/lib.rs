//! # ironcorpus
//!
//! Batch tools for preparing a plain-text **language-model corpus** from
//! scraped JSON documents.
//!
//! ## Key Features
//!
//! - **JSONL merging** - concatenate every `*.json` shard of a directory into
//!   one file, validating each line without re-serializing it
//! - **Corpus cleaning** - normalize, segment into sentences, filter noise, and
//!   write one sentence per line with a blank line between documents
//! - **Explicit policies** - invalid lines fail fast, are skipped, or are
//!   logged, as configured
//! - **Sequential and parallel execution** - per-document work on a rayon pool,
//!   with output order always equal to input order
//! - **Transparent compression** - gzip, zstd, bzip2 and xz inputs and outputs
//!   (each optional via feature flags)
//! - **Atomic outputs** - a failed run never leaves a truncated file behind
//!
//! ## Quick Start
//!
//! ```no_run
//! use ironcorpus::config::CleanConfig;
//! use ironcorpus::corpus::clean_corpus;
//!
//! # fn main() -> ironcorpus::Result<()> {
//! let config = CleanConfig {
//!     input_dir: "data/raw".into(),
//!     output: "data/corpus.txt".into(),
//!     ..CleanConfig::default()
//! };
//! let report = clean_corpus(&config)?;
//! println!("kept {} of {} sentences", report.filter.kept, report.filter.sentences);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipelines
//!
//! ### Merge
//!
//! [`merge::merge_json_dir`] lists `<dir>/*.json` ([`io::glob`]) and hands the
//! files to [`io::jsonl::LineCopier`]. Every input line appears in the output
//! byte for byte, unless the [`ValidationMode`] drops it.
//!
//! ### Clean
//!
//! [`corpus::CleaningPipeline`] runs the stages of the [`corpus`] module:
//!
//! 1. [`corpus::CorpusLoader`] reads JSON arrays of document records
//! 2. [`corpus::normalize`] collapses whitespace, drops non-ASCII, lowercases
//! 3. a [`corpus::SentenceSegmenter`] splits documents into sentences
//! 4. [`corpus::SentenceFilter`] strips leading noise and drops bad sentences
//! 5. [`corpus::join`] lays the result out one sentence per line
//!
//! The segmenter is a value owned by the pipeline. Any
//! `Fn(&str) -> Vec<String>` closure works in place of the built-in
//! [`corpus::RuleSegmenter`]:
//!
//! ```
//! use ironcorpus::corpus::CleaningPipeline;
//!
//! let pipeline = CleaningPipeline::new(|text: &str| {
//!     text.split(';').map(|s| s.trim().to_string()).collect::<Vec<_>>()
//! });
//! let doc = pipeline.clean_document("One two three; four five six");
//! assert_eq!(doc.sentences, vec!["one two three", "four five six"]);
//! ```
//!
//! ## Feature Flags
//!
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`,
//!   `compression-xz` - codecs selected by file extension (all enabled by default)

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod io;
pub mod merge;
pub mod metrics;
pub mod runner;
pub mod testing;
pub mod validation;

pub use config::{CleanConfig, MergeConfig};
pub use corpus::{CleaningPipeline, CorpusLoader, RuleSegmenter, SentenceFilter, SentenceSegmenter};
pub use error::{CorpusError, Result};
pub use merge::{MergeReport, merge_json_dir};
pub use metrics::RunReport;
pub use runner::{ExecMode, Runner};
pub use validation::{ErrorCollector, RecordError, ValidationMode};

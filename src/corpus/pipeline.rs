use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CleanConfig;
use crate::corpus::filter::{FilterConfig, FilterStats, SentenceFilter};
use crate::corpus::join::{join_documents, join_sentences};
use crate::corpus::loader::{CorpusLoader, LoadReport};
use crate::corpus::normalize::normalize;
use crate::corpus::segment::{RuleSegmenter, SentenceSegmenter};
use crate::error::Result;
use crate::io::atomic::write_atomic;
use crate::metrics::{RunReport, Stopwatch};
use crate::runner::{ExecMode, Runner};

/// A document after normalization, segmentation and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedDocument {
    pub sentences: Vec<String>,
    pub stats: FilterStats,
}

impl CleanedDocument {
    /// Sentences joined one per line.
    pub fn text(&self) -> String {
        join_sentences(&self.sentences)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub output: PathBuf,
    pub load: LoadReport,
    pub filter: FilterStats,
    /// Documents whose sentences were all rejected.
    pub empty_documents: usize,
    /// Length of the corpus text.
    pub corpus_bytes: usize,
    /// Size of the output file, which differs for compressed outputs.
    pub bytes_written: u64,
    pub elapsed_ms: u64,
}

impl RunReport for CleanReport {
    fn log_summary(&self) {
        info!(
            output = %self.output.display(),
            documents = self.load.documents,
            skipped = self.load.skipped,
            sentences = self.filter.sentences,
            kept = self.filter.kept,
            noisy = self.filter.rejected_noisy,
            short = self.filter.rejected_short,
            empty_documents = self.empty_documents,
            corpus_bytes = self.corpus_bytes,
            bytes_written = self.bytes_written,
            elapsed_ms = self.elapsed_ms,
            "corpus written"
        );
    }
}

/// Normalize → segment → filter → join, per document.
///
/// The segmenter is owned by the pipeline and shared by every document; build
/// it once and pass it in.
pub struct CleaningPipeline<S = RuleSegmenter> {
    segmenter: S,
    filter: SentenceFilter,
    runner: Runner,
}

impl<S: SentenceSegmenter> CleaningPipeline<S> {
    pub fn new(segmenter: S) -> Self {
        Self {
            segmenter,
            filter: SentenceFilter::default(),
            runner: Runner::default(),
        }
    }

    pub fn with_filter(mut self, config: FilterConfig) -> Self {
        self.filter = SentenceFilter::new(config);
        self
    }

    pub fn with_exec_mode(mut self, mode: ExecMode) -> Self {
        self.runner = Runner::new(mode);
        self
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn clean_document(&self, raw: &str) -> CleanedDocument {
        let normalized = normalize(raw);
        let segmented = self.segmenter.segment(&normalized);
        let mut stats = FilterStats::default();
        let sentences = self.filter.filter_with_stats(&segmented, &mut stats);
        CleanedDocument { sentences, stats }
    }

    /// Clean every document; output order matches input order in every mode.
    pub fn clean_documents<D: AsRef<str> + Sync>(&self, documents: &[D]) -> Result<Vec<CleanedDocument>> {
        self.runner
            .map_ordered(documents, |doc| self.clean_document(doc.as_ref()))
    }

    /// Clean and join documents into the final corpus text.
    pub fn clean_corpus<D: AsRef<str> + Sync>(&self, documents: &[D]) -> Result<String> {
        let cleaned = self.clean_documents(documents)?;
        Ok(join_cleaned(&cleaned))
    }

    /// Load `inputs`, clean them, and write the corpus to `output`.
    ///
    /// # Errors
    /// Loader errors (missing or malformed files) and output write errors.
    pub fn run(&self, inputs: &[PathBuf], output: &Path) -> Result<CleanReport> {
        let watch = Stopwatch::start();
        let loaded = CorpusLoader::new(inputs.iter().cloned()).load()?;
        info!(documents = loaded.documents.len(), "cleaning");

        let cleaned = self.clean_documents(&loaded.documents)?;
        let mut filter = FilterStats::default();
        let mut empty_documents = 0;
        for doc in &cleaned {
            filter += doc.stats;
            empty_documents += usize::from(doc.sentences.is_empty());
        }

        let corpus = join_cleaned(&cleaned);
        let bytes_written = write_atomic(output, corpus.as_bytes())?;

        let report = CleanReport {
            output: output.to_path_buf(),
            load: loaded.report,
            filter,
            empty_documents,
            corpus_bytes: corpus.len(),
            bytes_written,
            elapsed_ms: watch.elapsed_ms(),
        };
        report.log_summary();
        Ok(report)
    }
}

fn join_cleaned(cleaned: &[CleanedDocument]) -> String {
    let texts: Vec<String> = cleaned.iter().map(CleanedDocument::text).collect();
    join_documents(&texts)
}

impl CleaningPipeline<RuleSegmenter> {
    /// Pipeline with the built-in segmenter, configured from `config`.
    pub fn from_config(config: &CleanConfig) -> Self {
        let segmenter = RuleSegmenter::new().with_abbreviations(&config.abbreviations);
        Self::new(segmenter)
            .with_filter(config.filter)
            .with_exec_mode(config.exec)
    }
}

/// Run the cleaning pipeline described by `config`.
pub fn clean_corpus(config: &CleanConfig) -> Result<CleanReport> {
    CleaningPipeline::from_config(config).run(&config.input_paths(), &config.output)
}

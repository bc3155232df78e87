//! The corpus cleaning pipeline.
//!
//! Stages, in order:
//! - [`loader`]: JSON-array document files → raw document texts
//! - [`normalize`](mod@normalize): whitespace collapse, ASCII only, lowercase
//! - [`segment`]: document → sentences, behind the [`SentenceSegmenter`] seam
//! - [`filter`]: strip leading numbers/symbols, drop noisy and short sentences
//! - [`join`]: one sentence per line, a blank line between documents
//!
//! [`pipeline::CleaningPipeline`] strings them together.

pub mod document;
pub mod filter;
pub mod join;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod segment;

pub use document::DocumentRecord;
pub use filter::{FilterConfig, FilterStats, SentenceFilter, Verdict};
pub use join::{join_documents, join_sentences};
pub use loader::{CorpusLoader, LoadReport, LoadedCorpus, numbered_inputs};
pub use normalize::normalize;
pub use pipeline::{CleanReport, CleanedDocument, CleaningPipeline, clean_corpus};
pub use segment::{RuleSegmenter, SentenceSegmenter};

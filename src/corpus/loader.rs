use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::corpus::document::DocumentRecord;
use crate::error::{CorpusError, Result};
use crate::io::compression::auto_detect_reader;
use crate::validation::{ErrorCollector, RecordError};

/// Field the loader extracts from each record.
pub const TEXT_FIELD: &str = "text";

/// `<dir>/<n>.json` for every `n` in `range`, in order.
pub fn numbered_inputs(dir: impl AsRef<Path>, range: RangeInclusive<u32>) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    range.map(|n| dir.join(format!("{n}.json"))).collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub files: usize,
    pub records: usize,
    pub documents: usize,
    pub skipped: usize,
    /// Records skipped for lacking usable text.
    pub missing_text: ErrorCollector,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    /// Raw document texts in input order (file order, then record order).
    pub documents: Vec<String>,
    pub report: LoadReport,
}

/// Reads JSON-array document files into a flat list of document texts.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    inputs: Vec<PathBuf>,
}

impl CorpusLoader {
    pub fn new(inputs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Load every configured input, in order.
    ///
    /// # Errors
    /// Fails on the first missing, unreadable, or malformed file. Records
    /// without usable text are not errors; they are counted in the report.
    pub fn load(&self) -> Result<LoadedCorpus> {
        let mut corpus = LoadedCorpus::default();
        for path in &self.inputs {
            info!(file = %path.display(), "loading");
            load_file(path, &mut corpus)?;
        }
        if corpus.report.skipped > 0 {
            warn!(
                skipped = corpus.report.skipped,
                "records without usable `{TEXT_FIELD}` were skipped"
            );
        }
        Ok(corpus)
    }
}

/// Append the documents of one file to `corpus`.
pub fn load_file(path: &Path, corpus: &mut LoadedCorpus) -> Result<()> {
    let file = File::open(path).map_err(|e| CorpusError::open(path, e))?;
    let reader = auto_detect_reader(file, path).map_err(|e| CorpusError::access(path, e))?;
    let value: Value = serde_json::from_reader(BufReader::new(reader)).map_err(|source| {
        if source.is_io() {
            return CorpusError::access(path, source.into());
        }
        CorpusError::MalformedJson {
            path: path.to_path_buf(),
            line: (source.line() > 0).then(|| source.line()),
            source,
        }
    })?;

    let Value::Array(items) = value else {
        return Err(CorpusError::MalformedInput {
            path: path.to_path_buf(),
            reason: format!("top-level value is {}, expected an array", kind(&value)),
        });
    };

    let before = corpus.documents.len();
    let records = items.len();
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(CorpusError::MalformedInput {
                path: path.to_path_buf(),
                reason: format!("element #{index} is {}, expected an object", kind(&item)),
            });
        }
        let record: DocumentRecord =
            serde_json::from_value(item).map_err(|e| CorpusError::MalformedInput {
                path: path.to_path_buf(),
                reason: format!("element #{index}: {e}"),
            })?;
        match record.into_usable_text() {
            Some(text) => corpus.documents.push(text),
            None => {
                let missing = CorpusError::MissingField {
                    index,
                    field: TEXT_FIELD,
                };
                debug!(file = %path.display(), %missing, "skipping record");
                corpus
                    .report
                    .missing_text
                    .add(RecordError::at_index(path, index, missing.to_string()));
                corpus.report.skipped += 1;
            }
        }
    }

    let documents = corpus.documents.len() - before;
    info!(file = %path.display(), records, documents, "extracted text");
    corpus.report.files += 1;
    corpus.report.records += records;
    corpus.report.documents += documents;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

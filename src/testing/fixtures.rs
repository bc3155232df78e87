//! Pre-built corpus files and inputs for tests.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Document records in the on-disk shape: `text` is a one-element array.
///
/// The third record has no `text` and the fourth has an empty array; both
/// must be skipped by the loader.
///
/// ```
/// use ironcorpus::testing::sample_records;
///
/// assert_eq!(sample_records().len(), 4);
/// ```
#[must_use]
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "text": ["The quick brown fox jumps over the lazy dog. It was not amused!"],
            "uri": ["https://example.org/fox"],
        }),
        json!({
            "text": ["3 Dr. Smith arrived   at noon. Ok fine. He left again soon after."],
            "uri": ["https://example.org/smith"],
        }),
        json!({ "uri": ["https://example.org/empty"] }),
        json!({ "text": [] }),
    ]
}

/// Sentences exercising every filter rule, with the expected survivors.
#[must_use]
pub fn filter_cases() -> (Vec<String>, Vec<String>) {
    let input = vec![
        "7 hello there world".to_string(),
        "ok fine".to_string(),
        format!("noise {} here", ".".repeat(20)),
        "- a bulleted item here".to_string(),
        "a perfectly normal sentence.".to_string(),
    ];
    let expected = vec![
        "hello there world".to_string(),
        "a bulleted item here".to_string(),
        "a perfectly normal sentence.".to_string(),
    ];
    (input, expected)
}

/// Write `records` as a JSON array to `dir/name`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_document_file(dir: impl AsRef<Path>, name: &str, records: &[Value]) -> PathBuf {
    let path = dir.as_ref().join(name);
    let body = serde_json::to_string(records).expect("records serialize");
    fs::write(&path, body).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    path
}

/// Write one `<n>.json` per entry of `files`, numbered from 1.
///
/// # Panics
///
/// Panics if a file cannot be written.
pub fn write_numbered_inputs(dir: impl AsRef<Path>, files: &[Vec<Value>]) -> Vec<PathBuf> {
    files
        .iter()
        .enumerate()
        .map(|(i, records)| write_document_file(&dir, &format!("{}.json", i + 1), records))
        .collect()
}

/// Write raw `lines` (each followed by `\n`) to `dir/name`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_lines(dir: impl AsRef<Path>, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.as_ref().join(name);
    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    fs::write(&path, body).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    path
}

//! Example cleaning a small corpus into one sentence per line.
//!
//! This example shows:
//! - Writing document files in the `[{"text": ["..."]}]` shape
//! - Cleaning them with the built-in `RuleSegmenter`
//! - Plugging in a closure as the sentence segmenter
//! - Writing a compressed corpus and comparing the report's byte counts
//!
//! Run with: `cargo run --example clean_corpus`

use anyhow::Result as AnyhowResult;
use ironcorpus::corpus::{CleaningPipeline, numbered_inputs};
use ironcorpus::{ExecMode, RuleSegmenter, RunReport};
use serde_json::json;
use std::fs::{read_to_string, write};
use tempfile::TempDir;

fn main() -> AnyhowResult<()> {
    let dir = TempDir::new()?;

    let files = [
        vec![
            json!({"text": ["The café opened at 7 a.m. sharp. Dr. Lee was first in line!"]}),
            json!({"uri": ["https://example.org/no-text"]}),
        ],
        vec![json!({
            "text": ["2 Results are below. Ok. ~~~~~~~~~~~~~~~~~~~~ divider line. The end came quietly."]
        })],
    ];
    for (n, records) in files.iter().enumerate() {
        write(
            dir.path().join(format!("{}.json", n + 1)),
            serde_json::to_string(records)?,
        )?;
    }
    let inputs = numbered_inputs(dir.path(), 1..=2);

    println!("=== Rule-based segmenter ===");
    let pipeline = CleaningPipeline::new(RuleSegmenter::new());
    let output = dir.path().join("output.txt");
    let report = pipeline.run(&inputs, &output)?;
    println!("{}", read_to_string(&output)?);
    println!(
        "\nKept {} of {} sentences from {} documents ({} skipped)",
        report.filter.kept, report.filter.sentences, report.load.documents, report.load.skipped
    );

    println!("\n=== Closure segmenter ===");
    let by_semicolon = CleaningPipeline::new(|text: &str| {
        text.split(';').map(|s| s.trim().to_string()).collect::<Vec<_>>()
    })
    .with_exec_mode(ExecMode::Sequential);
    let doc = by_semicolon
        .clean_document("First clause has some words; 12 second clause counts too; too short");
    for sentence in &doc.sentences {
        println!("  {sentence}");
    }
    println!("  ({} rejected as too short)", doc.stats.rejected_short);

    #[cfg(feature = "compression-gzip")]
    {
        println!("\n=== Compressed output ===");
        let gz_output = dir.path().join("output.txt.gz");
        let report = pipeline.run(&inputs, &gz_output)?;
        println!(
            "Corpus text: {} bytes, on disk: {} bytes",
            report.corpus_bytes, report.bytes_written
        );
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    }

    Ok(())
}

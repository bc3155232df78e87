//! Integration tests for merging a directory of JSONL shards.

use ironcorpus::testing::*;
use ironcorpus::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(input: &Path, output: &Path, on_invalid: ValidationMode) -> MergeConfig {
    MergeConfig {
        json_path: input.to_path_buf(),
        output_file: output.to_path_buf(),
        on_invalid,
        ..MergeConfig::default()
    }
}

#[test]
fn test_merge_is_complete_and_byte_identical() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    write_lines(input.path(), "a.json", &[r#"{"id":1}"#, r#"{ "b" : 2 ,"a":1 }"#]);
    write_lines(input.path(), "b.json", &[r#"[1, 2,3]"#, "42", r#""just a string""#]);
    write_lines(input.path(), "c.json", &[r#"{"text":["café"],"uri":null}"#]);
    // Not a shard: wrong extension.
    write_lines(input.path(), "notes.txt", &["not json"]);

    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast))?;

    assert_eq!(report.copy.files, 3);
    assert_eq!(report.copy.lines_written, 6);
    assert_eq!(report.copy.lines_rejected, 0);
    assert_file_lines(
        &output,
        &[
            r#"{"id":1}"#,
            r#"{ "b" : 2 ,"a":1 }"#,
            r#"[1, 2,3]"#,
            "42",
            r#""just a string""#,
            r#"{"text":["café"],"uri":null}"#,
        ],
    );
    Ok(())
}

#[test]
fn test_merge_normalizes_line_endings() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let output = input.path().join("out").join("merged.jsonl");

    fs::write(input.path().join("crlf.json"), "{\"a\":1}\r\n{\"a\":2}\r\n")?;
    fs::write(input.path().join("unterminated.json"), "{\"b\":1}\n{\"b\":2}")?;

    merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast))?;

    let merged = fs::read_to_string(&output)?;
    assert_eq!(merged, "{\"a\":1}\n{\"a\":2}\n{\"b\":1}\n{\"b\":2}\n");
    Ok(())
}

#[test]
fn test_fail_fast_leaves_no_output() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    write_lines(input.path(), "a.json", &[r#"{"ok":true}"#]);
    write_lines(input.path(), "b.json", &[r#"{"ok":true}"#, r#"{"broken":"#]);

    let err = merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast)).unwrap_err();
    match err {
        CorpusError::MalformedJson { path, line, .. } => {
            assert!(path.ends_with("b.json"));
            assert_eq!(line, Some(2));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(!output.exists());
    assert_eq!(fs::read_dir(out_dir.path())?.count(), 0, "staging file left behind");
    Ok(())
}

#[test]
fn test_fail_fast_keeps_previous_output() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");
    fs::write(&output, "previous\n")?;

    write_lines(input.path(), "a.json", &["{not json"]);

    assert!(merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast)).is_err());
    assert_eq!(fs::read_to_string(&output)?, "previous\n");
    Ok(())
}

#[test]
fn test_skip_mode_drops_invalid_and_blank_lines() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    write_lines(input.path(), "a.json", &[r#"{"n":1}"#, "", r#"{"n":"#, r#"{"n":2}"#]);

    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::SkipInvalid))?;

    assert_eq!(report.copy.lines_written, 2);
    assert_eq!(report.copy.lines_rejected, 2);
    assert!(report.copy.rejected.is_empty());
    assert_file_lines(&output, &[r#"{"n":1}"#, r#"{"n":2}"#]);
    Ok(())
}

#[test]
fn test_log_mode_records_rejections() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    write_lines(input.path(), "a.json", &[r#"{"n":1}"#, "oops"]);
    write_lines(input.path(), "b.json", &["", r#"{"n":2}"#]);

    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::LogAndContinue))?;

    assert_eq!(report.copy.lines_written, 2);
    assert_eq!(report.copy.rejected.error_count(), 2);
    let first = &report.copy.rejected.errors()[0];
    assert!(first.source.ends_with("a.json"));
    assert_eq!(first.line, Some(2));
    let second = &report.copy.rejected.errors()[1];
    assert!(second.source.ends_with("b.json"));
    assert_eq!(second.line, Some(1));

    let json = report.to_json();
    assert_eq!(json["on_invalid"], "log");
    assert_eq!(json["lines_written"], 2);
    assert_eq!(json["rejected"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_previous_output_is_not_merged_into_itself() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("merged_output.json");

    write_lines(dir.path(), "1.json", &[r#"{"n":1}"#]);
    write_lines(dir.path(), "2.json", &[r#"{"n":2}"#]);

    let first = merge_json_dir(&config(dir.path(), &output, ValidationMode::FailFast))?;
    let second = merge_json_dir(&config(dir.path(), &output, ValidationMode::FailFast))?;

    assert_eq!(first.copy.lines_written, 2);
    assert_eq!(second.copy.files, 2);
    assert_eq!(second.copy.lines_written, 2);
    assert_file_lines(&output, &[r#"{"n":1}"#, r#"{"n":2}"#]);
    Ok(())
}

#[test]
fn test_empty_directory_gives_empty_output() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast))?;

    assert_eq!(report.copy.files, 0);
    assert_eq!(fs::read_to_string(&output)?, "");
    Ok(())
}

#[test]
fn test_missing_directory_is_reported() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("nope");
    let output = dir.path().join("merged.jsonl");

    let err = merge_json_dir(&config(&missing, &output, ValidationMode::FailFast)).unwrap_err();
    assert!(matches!(err, CorpusError::MissingFile { path } if path == missing));
    assert!(!output.exists());
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn test_gzip_shard_is_detected_by_magic_bytes() -> anyhow::Result<()> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"{\"z\":1}\n{\"z\":2}\n")?;
    fs::write(input.path().join("packed.json"), encoder.finish()?)?;
    write_lines(input.path(), "plain.json", &[r#"{"p":1}"#]);

    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast))?;

    assert_eq!(report.copy.lines_written, 3);
    assert_file_lines(&output, &[r#"{"z":1}"#, r#"{"z":2}"#, r#"{"p":1}"#]);
    Ok(())
}

#[test]
fn test_report_saved_as_pretty_json() -> anyhow::Result<()> {
    let input = TempDir::new()?;
    let out_dir = TempDir::new()?;
    let output = out_dir.path().join("merged.jsonl");
    let report_path = out_dir.path().join("reports").join("merge.json");

    write_lines(input.path(), "a.json", &[r#"{"n":1}"#]);
    let report = merge_json_dir(&config(input.path(), &output, ValidationMode::FailFast))?;
    report.save_to_file(&report_path)?;

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
    assert_eq!(saved["files"], 1);
    assert_eq!(saved["lines_written"], 1);
    assert_eq!(saved["on_invalid"], "fail-fast");
    Ok(())
}

//! Integration tests for input enumeration.

use ironcorpus::CorpusError;
use ironcorpus::io::glob::{expand_glob, expand_glob_required, list_json_files};
use ironcorpus::testing::assert_collections_equal;
use std::fs::{create_dir_all, write};
use tempfile::TempDir;

#[test]
fn test_lists_only_json_files_sorted() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = dir.path();

    for name in ["b.json", "a.json", "10.json", "notes.txt", "data.jsonl", "c.json.bak"] {
        write(base.join(name), "{}\n")?;
    }
    create_dir_all(base.join("nested.json"))?;
    create_dir_all(base.join("sub"))?;
    write(base.join("sub").join("deep.json"), "{}\n")?;

    let files = list_json_files(base)?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    assert_collections_equal(&names, &["10.json".into(), "a.json".into(), "b.json".into()]);
    Ok(())
}

#[test]
fn test_directory_with_glob_metacharacters() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let odd = dir.path().join("shards [2024]");
    create_dir_all(&odd)?;
    write(odd.join("1.json"), "{}\n")?;

    let files = list_json_files(&odd)?;
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("1.json"));
    Ok(())
}

#[test]
fn test_empty_directory_lists_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    assert!(list_json_files(dir.path())?.is_empty());
    Ok(())
}

#[test]
fn test_missing_directory() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("absent");
    let err = list_json_files(&missing).unwrap_err();
    assert!(matches!(err, CorpusError::MissingFile { .. }));
    Ok(())
}

#[test]
fn test_expand_glob_patterns() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let base = dir.path();
    for name in ["part-1.jsonl", "part-2.jsonl", "other.jsonl"] {
        write(base.join(name), "{}\n")?;
    }

    let pattern = format!("{}/part-*.jsonl", base.display());
    assert_eq!(expand_glob(&pattern)?.len(), 2);

    let none = format!("{}/*.csv", base.display());
    assert!(expand_glob(&none)?.is_empty());
    let err = expand_glob_required(&none).unwrap_err();
    assert!(matches!(err, CorpusError::NoMatches { pattern } if pattern == none));
    Ok(())
}

#[test]
fn test_invalid_pattern() {
    let err = expand_glob("data/[*.json").unwrap_err();
    assert!(matches!(err, CorpusError::InvalidPattern { .. }));
}

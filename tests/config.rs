//! Configuration loading and command-line precedence.

use clap::Parser;
use ironcorpus::cli::{Cli, Commands};
use ironcorpus::config::load_config;
use ironcorpus::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn clean_args(args: &[&str]) -> ironcorpus::cli::CleanArgs {
    let mut argv = vec!["ironcorpus", "clean"];
    argv.extend_from_slice(args);
    match Cli::try_parse_from(argv).map(|cli| cli.command) {
        Ok(Commands::Clean(args)) => args,
        other => panic!("unexpected parse result: {other:?}"),
    }
}

#[test]
fn test_file_then_flags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("clean.json");
    fs::write(
        &path,
        r#"{
            "input_dir": "from-file",
            "inputs": ["x.json", "y.json"],
            "exec": {"mode": "sequential"},
            "filter": {"special_char_limit": 10},
            "abbreviations": ["approx"]
        }"#,
    )?;
    let path_str = path.to_string_lossy().into_owned();

    let from_file = clean_args(&["--config", &path_str]).to_config()?;
    assert_eq!(from_file.input_dir, PathBuf::from("from-file"));
    assert_eq!(from_file.inputs, vec!["x.json", "y.json"]);
    assert_eq!(from_file.exec, ExecMode::Sequential);
    assert_eq!(from_file.filter.special_char_limit, 10);
    assert_eq!(from_file.filter.min_tokens, 3);
    assert_eq!(from_file.output, CleanConfig::default().output);

    let overridden = clean_args(&[
        "--config",
        &path_str,
        "--input-dir",
        "from-flag",
        "--output",
        "corpus.txt",
        "--threads",
        "2",
    ])
    .to_config()?;
    assert_eq!(overridden.input_dir, PathBuf::from("from-flag"));
    assert_eq!(overridden.inputs, vec!["x.json", "y.json"]);
    assert_eq!(overridden.output, PathBuf::from("corpus.txt"));
    assert_eq!(overridden.exec, ExecMode::Parallel { threads: Some(2) });
    Ok(())
}

#[test]
fn test_defaults_without_file() -> anyhow::Result<()> {
    assert_eq!(clean_args(&[]).to_config()?, CleanConfig::default());
    let sequential = clean_args(&["--sequential"]).to_config()?;
    assert_eq!(sequential.exec, ExecMode::Sequential);
    Ok(())
}

#[test]
fn test_missing_config_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("absent.json");
    let err = load_config::<CleanConfig>(&missing).unwrap_err();
    assert!(matches!(err, CorpusError::MissingFile { .. }));
    Ok(())
}

#[test]
fn test_invalid_config_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("merge.json");

    fs::write(&path, r#"{"json_path": "shards", "on_invalid": "sometimes"}"#)?;
    let err = load_config::<MergeConfig>(&path).unwrap_err();
    assert!(matches!(err, CorpusError::Config { .. }));

    fs::write(&path, r#"{"json_path": "shards", "on_invalid": "skip"}"#)?;
    let config = load_config::<MergeConfig>(&path)?;
    assert_eq!(config.json_path, PathBuf::from("shards"));
    assert_eq!(config.on_invalid, ValidationMode::SkipInvalid);
    assert_eq!(config.output_file, MergeConfig::default().output_file);
    Ok(())
}

#[test]
fn test_merge_flags() {
    let cli = Cli::try_parse_from([
        "ironcorpus",
        "merge",
        "--json_path",
        "in",
        "--output-file",
        "out.json",
        "--progress-every",
        "0",
        "--on-invalid",
        "skip",
    ]);
    let Ok(Cli {
        command: Commands::Merge(args),
        ..
    }) = cli
    else {
        panic!("merge flags did not parse");
    };
    let config = args.to_config();
    assert_eq!(config.json_path, PathBuf::from("in"));
    assert_eq!(config.output_file, PathBuf::from("out.json"));
    assert_eq!(config.progress_every, 0);
    assert_eq!(config.on_invalid, ValidationMode::SkipInvalid);
}

#[test]
fn test_unknown_on_invalid_value_is_rejected() {
    assert!(Cli::try_parse_from(["ironcorpus", "merge", "--on-invalid", "ignore"]).is_err());
}

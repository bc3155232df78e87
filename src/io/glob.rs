//! Input file enumeration.
//!
//! The merge pipeline works on "every `.json` file in a directory". That is a
//! single-level glob (`<dir>/*.json`), so it is expressed with the `glob`
//! crate rather than a hand-written directory walk.
//!
//! ```no_run
//! use ironcorpus::io::glob::{expand_glob, list_json_files};
//!
//! let shards = list_json_files("data/shards")?;
//! let logs = expand_glob("logs/*.jsonl")?;
//! # Ok::<(), ironcorpus::CorpusError>(())
//! ```

use glob::{Pattern, glob};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CorpusError, Result};

/// Extension (without dot) picked up by [`list_json_files`].
pub const JSON_EXTENSION: &str = "json";

/// List the regular files directly inside `dir` whose name ends in `.json`.
///
/// Subdirectories are not descended into, and a directory that happens to be
/// named `*.json` is not returned. The result is sorted so progress output is
/// reproducible; nothing downstream depends on the order.
///
/// # Errors
///
/// [`CorpusError::MissingFile`] if `dir` does not exist, otherwise the errors
/// of [`expand_glob`].
pub fn list_json_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CorpusError::MissingFile {
            path: dir.to_path_buf(),
        });
    }
    // Escape the directory so `[` or `*` in a real path are matched literally.
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped}/*.{JSON_EXTENSION}");
    expand_glob(&pattern)
}

/// Expand a glob pattern into a sorted list of matching files.
///
/// Directories matching the pattern are dropped. Zero matches is not an
/// error; see [`expand_glob_required`].
///
/// # Errors
///
/// [`CorpusError::InvalidPattern`] for a malformed pattern and
/// [`CorpusError::FileAccess`] when a matched entry cannot be inspected.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).map_err(|e| CorpusError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            CorpusError::access(path, io::Error::from(e))
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Like [`expand_glob`], but zero matches is a [`CorpusError::NoMatches`].
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = expand_glob(pattern)?;
    if files.is_empty() {
        return Err(CorpusError::NoMatches {
            pattern: pattern.to_string(),
        });
    }
    Ok(files)
}

//! Write-then-rename output files.
//!
//! Output is staged in a temporary file next to the destination and renamed
//! into place by [`AtomicOutput::commit`]. Dropping an uncommitted output
//! removes the staging file, so an aborted run never leaves a truncated
//! corpus behind and never clobbers the previous one.

use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{CorpusError, Result};
use crate::io::compression::{FinishWrite, auto_detect_writer};

pub struct AtomicOutput {
    path: PathBuf,
    // Dropped before `staging`, so buffered bytes never outlive the file.
    writer: Box<dyn FinishWrite>,
    staging: NamedTempFile,
}

impl AtomicOutput {
    /// Stage a new output for `path`, creating parent directories as needed.
    ///
    /// The writer compresses when the destination extension names a codec.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir_all(&dir).map_err(|e| CorpusError::access(&dir, e))?;

        let staging = NamedTempFile::new_in(&dir).map_err(|e| CorpusError::access(&dir, e))?;
        let file = staging
            .as_file()
            .try_clone()
            .map_err(|e| CorpusError::access(staging.path(), e))?;
        let writer = auto_detect_writer(file, &path).map_err(|e| CorpusError::access(&path, e))?;
        Ok(Self {
            path,
            writer,
            staging,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finish the writer and move the staged file over the destination.
    ///
    /// Returns the size of the committed file in bytes (after compression).
    ///
    /// # Errors
    /// A failed flush or trailer write aborts the commit; the destination is
    /// left untouched and the staging file is removed.
    pub fn commit(self) -> Result<u64> {
        let Self {
            path,
            writer,
            staging,
        } = self;
        writer.finish().map_err(|e| CorpusError::access(&path, e))?;
        let len = staging
            .as_file()
            .metadata()
            .map_err(|e| CorpusError::access(&path, e))?
            .len();
        staging
            .persist(&path)
            .map_err(|e| CorpusError::access(&path, e.error))?;
        Ok(len)
    }
}

impl Write for AtomicOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write `contents` to `path` atomically, returning the committed size.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<u64> {
    let mut out = AtomicOutput::create(path)?;
    out.write_all(contents)
        .map_err(|e| CorpusError::access(out.path(), e))?;
    out.commit()
}

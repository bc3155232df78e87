//! In-memory I/O doubles for exercising write failures.

use std::io::{self, Write};

/// A writer that accepts a fixed number of bytes, then fails every write.
///
/// Flushing always succeeds, so a failure only surfaces once bytes actually
/// reach this writer (for example when a buffer or encoder drains into it).
///
/// ```
/// use ironcorpus::testing::FailingWriter;
/// use std::io::Write;
///
/// let mut w = FailingWriter::after(3);
/// assert!(w.write_all(b"abc").is_ok());
/// assert!(w.write_all(b"d").is_err());
/// ```
#[derive(Debug)]
pub struct FailingWriter {
    remaining: usize,
    accepted: Vec<u8>,
}

impl FailingWriter {
    #[must_use]
    pub fn after(limit: usize) -> Self {
        Self {
            remaining: limit,
            accepted: Vec::new(),
        }
    }

    /// Bytes written before the limit was hit.
    pub fn accepted(&self) -> &[u8] {
        &self.accepted
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.remaining == 0 {
            return Err(io::Error::other("device full"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        self.accepted.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

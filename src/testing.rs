//! Testing utilities for corpus pipelines.
//!
//! - **Assertions**: ordered equality, order-preserving subsequences, file lines
//! - **Fixtures**: document files in the on-disk shape, JSONL files, filter cases
//! - **Mock I/O**: writers that fail after a byte budget
//!
//! ```no_run
//! use ironcorpus::corpus::{CorpusLoader, numbered_inputs};
//! use ironcorpus::testing::*;
//!
//! #[test]
//! fn loads_fixture() -> anyhow::Result<()> {
//!     let dir = tempfile::tempdir()?;
//!     write_numbered_inputs(dir.path(), &[sample_records()]);
//!     let loaded = CorpusLoader::new(numbered_inputs(dir.path(), 1..=1)).load()?;
//!     assert_eq!(loaded.documents.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;

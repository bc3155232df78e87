//! Per-document execution: sequential or on a rayon pool.
//!
//! Documents are independent, so the cleaning stages can be mapped over them
//! in parallel. Whatever the mode, results come back in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CorpusError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ExecMode {
    Sequential,
    /// `threads: None` sizes the pool with `num_cpus`.
    Parallel {
        #[serde(default)]
        threads: Option<usize>,
    },
}

impl Default for ExecMode {
    fn default() -> Self {
        Self::Parallel { threads: None }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Runner {
    pub mode: ExecMode,
}

impl Runner {
    pub fn new(mode: ExecMode) -> Self {
        Self { mode }
    }

    pub fn sequential() -> Self {
        Self::new(ExecMode::Sequential)
    }

    /// Apply `f` to every item, returning outputs in input order.
    ///
    /// The parallel path builds a dedicated pool per call, so concurrent
    /// runners with different thread counts do not interfere.
    pub fn map_ordered<T, O, F>(&self, items: &[T], f: F) -> Result<Vec<O>>
    where
        T: Sync,
        O: Send,
        F: Fn(&T) -> O + Send + Sync,
    {
        match self.mode {
            ExecMode::Sequential => Ok(items.iter().map(f).collect()),
            ExecMode::Parallel { threads } => {
                let threads = threads.unwrap_or_else(num_cpus::get).max(1);
                if threads == 1 || items.len() <= 1 {
                    return Ok(items.iter().map(f).collect());
                }
                debug!(threads, items = items.len(), "parallel map");
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| CorpusError::ThreadPool(e.to_string()))?;
                // `collect` on an indexed parallel iterator keeps input order.
                Ok(pool.install(|| items.par_iter().map(f).collect()))
            }
        }
    }
}

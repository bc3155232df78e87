//! File I/O: enumeration, JSONL copying, compression, and atomic outputs.

pub mod atomic;
pub mod compression;
pub mod glob;
pub mod jsonl;

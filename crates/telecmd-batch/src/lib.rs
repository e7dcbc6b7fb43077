//! Telecmd Batch - Batch file source and run loop
//!
//! Provides:
//! - The `BatchSource` contract for anything that yields telecommand records
//! - Line-oriented sources over any `BufRead`, and over batch files on disk
//! - The batch runner that feeds records through the dispatcher
//! - A decode-only check pass

pub mod errors;
pub mod runner;
pub mod source;

// Re-export key types
pub use errors::Result;
pub use runner::{check_batch, run_batch, BatchSummary, RunOptions};
pub use source::{tokenize_line, BatchSource, FileSource, LineSource};

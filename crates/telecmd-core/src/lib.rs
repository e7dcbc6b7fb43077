//! Telecmd Core - Telecommand queue engine
//!
//! This crate provides the in-memory queue that a telecommand batch is
//! interpreted against, including:
//! - Command entries and structured requests
//! - An arena-backed doubly-linked queue with monotonically assigned entry indices
//! - Queued mutations (enqueue, delete by target, modify by target)
//! - Bottom-up merge sort by descending priority
//! - In-place reversal
//! - A draining execution pass
//! - The dispatcher mapping command codes onto the above
//! - Structured error and logging facilities

pub mod commands;
pub mod dispatch;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod render;

pub use telecmd_core_types::schema;

// Re-export commonly used types
pub use commands::Request;
pub use dispatch::{apply_request, decode_request, dispatch, DispatchOutcome};
pub use errors::{ExError, ExErrorKind, Result, TelecmdError};
pub use model::{CommandEntry, CommandKind, Record};
pub use ops::QueueStore;
pub use render::PrintFormat;

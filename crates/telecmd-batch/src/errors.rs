//! Error handling for telecmd-batch
//!
//! Wraps telecmd-core ExError with batch-specific helpers

use std::path::Path;

use telecmd_core::errors::{ExError, ExErrorKind, TelecmdError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create the fatal error for a batch source that cannot be opened
pub fn source_unavailable(path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::SourceUnavailable)
        .with_op("open_source")
        .with_message(format!(
            "Failed to open telecommand file {}: {}",
            path.display(),
            err
        ))
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a malformed record error for a line that cannot be tokenized
pub fn malformed_record(line: usize, reason: impl Into<String>) -> ExError {
    ExError::from(TelecmdError::MalformedRecord {
        line,
        reason: reason.into(),
    })
    .with_op("tokenize_line")
}

use telecmd_core_types::RunId;
use thiserror::Error;

use crate::model::CommandKind;

/// Result type alias using TelecmdError
pub type Result<T> = std::result::Result<T, TelecmdError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// reported while interpreting a telecommand batch. Each kind maps to a stable
/// error code that can be used for programmatic handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Record decoding
    InvalidInput,
    UnknownCommand,

    // Queue state
    NotFound,
    NotQueueable,
    InvalidInQueue,

    // Resources
    ResourceExhausted,

    // Integration/IO
    Io,
    SourceUnavailable,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotQueueable => "ERR_NOT_QUEUEABLE",
            ExErrorKind::InvalidInQueue => "ERR_INVALID_IN_QUEUE",
            ExErrorKind::ResourceExhausted => "ERR_RESOURCE_EXHAUSTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::SourceUnavailable => "ERR_SOURCE_UNAVAILABLE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind halts the whole batch
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExErrorKind::SourceUnavailable)
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for
/// diagnostics (the failing line and/or entry index).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    line: Option<usize>,
    entry_index: Option<u32>,
    target_index: Option<u32>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            line: None,
            entry_index: None,
            target_index: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add batch line context (1-based)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add entry index context
    pub fn with_entry_index(mut self, entry_index: u32) -> Self {
        self.entry_index = Some(entry_index);
        self
    }

    /// Add target index context
    pub fn with_target_index(mut self, target_index: u32) -> Self {
        self.target_index = Some(target_index);
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the batch line context, if any
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the entry index context, if any
    pub fn entry_index(&self) -> Option<u32> {
        self.entry_index
    }

    /// Get the target index context, if any
    pub fn target_index(&self) -> Option<u32> {
        self.target_index
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(entry_index) = self.entry_index {
            write!(f, " (entry_index: {})", entry_index)?;
        }
        if let Some(target_index) = self.target_index {
            write!(f, " (target_index: {})", target_index)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for queue and dispatch operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelecmdError {
    // ===== Decoding Errors =====
    /// Leading command code is not one of the known codes
    #[error("Invalid command received: code {code} (line {line})")]
    UnknownCommandCode { code: u32, line: usize },

    /// Record could not be decoded into a request
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    // ===== Queue Errors =====
    /// No live entry carries the given index
    #[error("Entry not found in queue: {entry_index}")]
    EntryNotFound { entry_index: u32 },

    /// Utility requests act immediately and are never stored
    #[error("{kind} requests cannot be queued")]
    NotQueueable { kind: CommandKind },

    /// A utility kind was found inside the queue
    #[error("Invalid command found in queue: {kind} (entry {entry_index})")]
    InvalidInQueue { entry_index: u32, kind: CommandKind },

    /// Forward/backward links disagree
    #[error("Queue link integrity violated: {reason}")]
    LinkIntegrity { reason: String },

    /// Storage for a new entry could not be reserved
    #[error("Failed to allocate storage for new entry: {reason}")]
    AllocationFailed { reason: String },

    // ===== Output Errors =====
    /// Writing printed entries to the output sink failed
    #[error("Failed to write queue output: {message}")]
    Output { message: String },

    /// Serializing an entry for output failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<TelecmdError> for ExError {
    fn from(err: TelecmdError) -> Self {
        match err {
            TelecmdError::UnknownCommandCode { code, line } => {
                ExError::new(ExErrorKind::UnknownCommand)
                    .with_op("dispatch")
                    .with_line(line)
                    .with_message(format!("Invalid command received: code {}", code))
            }

            TelecmdError::MalformedRecord { line, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("decode_request")
                    .with_line(line)
                    .with_message(reason)
            }

            TelecmdError::EntryNotFound { entry_index } => ExError::new(ExErrorKind::NotFound)
                .with_target_index(entry_index)
                .with_message("Node not found in queue"),

            TelecmdError::NotQueueable { kind } => ExError::new(ExErrorKind::NotQueueable)
                .with_op("enqueue")
                .with_message(format!("{} requests cannot be queued", kind)),

            TelecmdError::InvalidInQueue { entry_index, kind } => {
                ExError::new(ExErrorKind::InvalidInQueue)
                    .with_entry_index(entry_index)
                    .with_message(format!("Invalid command found in queue: {}", kind))
            }

            TelecmdError::LinkIntegrity { reason } => ExError::new(ExErrorKind::Internal)
                .with_op("validate_links")
                .with_message(reason),

            TelecmdError::AllocationFailed { reason } => {
                ExError::new(ExErrorKind::ResourceExhausted)
                    .with_op("enqueue")
                    .with_message(reason)
            }

            TelecmdError::Output { message } => ExError::new(ExErrorKind::Io)
                .with_op("print")
                .with_message(message),

            TelecmdError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("print")
                    .with_message(message)
            }
        }
    }
}

impl From<std::io::Error> for TelecmdError {
    fn from(err: std::io::Error) -> Self {
        TelecmdError::Output {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TelecmdError {
    fn from(err: serde_json::Error) -> Self {
        TelecmdError::Serialization {
            message: err.to_string(),
        }
    }
}

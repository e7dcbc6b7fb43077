//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Queue identifiers
pub const FIELD_ENTRY_INDEX: &str = "entry_index";
pub const FIELD_TARGET_INDEX: &str = "target_index";
pub const FIELD_LINE: &str = "line";
pub const FIELD_CODE: &str = "code";

// Collection sizes
pub const FIELD_QUEUE_LEN: &str = "queue_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

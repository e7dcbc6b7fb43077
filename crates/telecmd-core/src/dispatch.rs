//! Dispatcher
//!
//! This module maps decoded batch records onto queue operations. It is the
//! only place that knows what a command code means.
//!
//! ## Routing
//!
//! - Codes 0, 1, 2 and 4 (new, new with priority, delete, modify) are queued
//!   as pending entries; nothing is applied to other entries yet
//! - Codes 3, 5, 6 and 7 (sort, print, reverse, execute) act on the queue
//!   immediately and are never stored
//!
//! ## Logging Ownership
//!
//! The dispatcher owns lifecycle logging for every request:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure, and once per failure collected by a print
//!   or execute pass
//!
//! Lower layers (ops, render) use only `tracing::debug!()` for internal details.
//!
//! ## Example
//!
//! ```
//! use telecmd_core::dispatch::{dispatch, DispatchOutcome};
//! use telecmd_core::model::Record;
//! use telecmd_core::render::PrintFormat;
//! use telecmd_core::QueueStore;
//!
//! let mut store = QueueStore::new();
//! let mut out = Vec::new();
//!
//! let record = Record::new(1, 1, vec![5, 100]);
//! let outcome = dispatch(&mut store, &record, &mut out, PrintFormat::Tuple).unwrap();
//! assert_eq!(outcome, DispatchOutcome::Enqueued { entry_index: 0 });
//!
//! dispatch(&mut store, &Record::new(2, 5, vec![]), &mut out, PrintFormat::Tuple).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "(0, 5, 100)\n");
//! ```

use std::io::Write;
use std::time::Instant;

use crate::commands::Request;
use crate::errors::{Result, TelecmdError};
use crate::model::{CommandKind, Record};
use crate::ops::{enqueue, execute_queue, reverse_queue, sort_queue, ExecutionReport, QueueStore};
use crate::render::{print_queue, PrintFormat, PrintReport};
use crate::{log_op_end, log_op_error, log_op_start};

/// What a dispatched request did to the queue
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// A new, delete or modify request was queued
    Enqueued { entry_index: u32 },
    Sorted { passes: usize },
    Printed(PrintReport),
    Reversed,
    Executed(ExecutionReport),
}

impl DispatchOutcome {
    /// Failures collected while the operation still completed
    pub fn reported_errors(&self) -> &[TelecmdError] {
        match self {
            DispatchOutcome::Printed(report) => &report.errors,
            DispatchOutcome::Executed(report) => &report.errors,
            _ => &[],
        }
    }
}

/// Decode a record into a structured request
///
/// Fields beyond the ones a command needs are ignored.
///
/// # Errors
/// * `UnknownCommandCode` - If the leading code is not 0..=7
/// * `MalformedRecord` - If the record has fewer fields than its command needs
pub fn decode_request(record: &Record) -> Result<Request> {
    let kind = CommandKind::from_code(record.code).ok_or(TelecmdError::UnknownCommandCode {
        code: record.code,
        line: record.line,
    })?;

    let needed = kind.field_count();
    let found = record.fields.len();
    if found < needed {
        return Err(TelecmdError::MalformedRecord {
            line: record.line,
            reason: format!("{} expects {} field(s), found {}", kind, needed, found),
        });
    }
    if found > needed {
        tracing::debug!(
            line = record.line,
            ignored = found - needed,
            "trailing fields ignored"
        );
    }

    let field = |position: usize| record.fields[position];
    Ok(match kind {
        CommandKind::NewLowPriority => Request::NewLowPriority { data: field(0) },
        CommandKind::NewWithPriority => Request::NewWithPriority {
            priority: field(0),
            data: field(1),
        },
        CommandKind::Delete => Request::Delete {
            target_index: field(0),
        },
        CommandKind::Sort => Request::Sort,
        CommandKind::Modify => Request::Modify {
            target_index: field(0),
            new_data: field(1),
        },
        CommandKind::Print => Request::Print,
        CommandKind::Reverse => Request::Reverse,
        CommandKind::Execute => Request::Execute,
    })
}

/// Decode a record and apply it to the queue
///
/// # Errors
///
/// Returns decoding errors (`UnknownCommandCode`, `MalformedRecord`) and the
/// errors of `apply_request`. The queue is unchanged on error.
pub fn dispatch(
    store: &mut QueueStore,
    record: &Record,
    out: &mut dyn Write,
    format: PrintFormat,
) -> Result<DispatchOutcome> {
    let request = decode_request(record).map_err(|e| {
        log_op_error!("dispatch", e.clone(), duration_ms = 0u64);
        e
    })?;
    apply_request(store, request, out, format)
}

/// Apply a structured request to the queue
///
/// Queueable requests are head-inserted; utility requests run immediately.
/// Printed lines go to `out`.
///
/// # Errors
/// * `AllocationFailed` - If a queueable request cannot be stored
/// * `Output` / `Serialization` - If printing fails
pub fn apply_request(
    store: &mut QueueStore,
    request: Request,
    out: &mut dyn Write,
    format: PrintFormat,
) -> Result<DispatchOutcome> {
    let op = request.kind().as_str();
    log_op_start!(op, queue_len = store.len());
    let start = Instant::now();

    let result = match request {
        Request::Sort => Ok(DispatchOutcome::Sorted {
            passes: sort_queue(store),
        }),
        Request::Print => print_queue(store, out, format).map(DispatchOutcome::Printed),
        Request::Reverse => {
            reverse_queue(store);
            Ok(DispatchOutcome::Reversed)
        }
        Request::Execute => Ok(DispatchOutcome::Executed(execute_queue(store))),
        queued => enqueue(store, &queued).map(|entry_index| DispatchOutcome::Enqueued { entry_index }),
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            for e in outcome.reported_errors() {
                log_op_error!(op, e.clone(), duration_ms = duration_ms);
            }
            log_op_end!(op, duration_ms = duration_ms, queue_len = store.len());
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }

    result
}

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TelecmdError};
use crate::model::{CommandEntry, CommandKind};
use crate::ops::QueueStore;

/// Output format for printed queue entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintFormat {
    /// Parenthesised tuples, one per line, e.g. `(0, 5, 100)`
    #[default]
    Tuple,
    /// One JSON object per line
    Json,
}

/// Outcome of printing the queue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintReport {
    /// Lines written to the sink
    pub lines: usize,
    /// Entries that could not be rendered (utility kinds)
    pub errors: Vec<TelecmdError>,
}

/// Render a single entry as one output line (without newline)
///
/// Tuple layout depends on the entry kind:
/// - new commands: `(entry_index, priority, data)`
/// - delete: `(entry_index, target_index)`
/// - modify: `(entry_index, target_index, new_data)`
///
/// # Errors
/// * `InvalidInQueue` - If the entry has a utility kind
/// * `Serialization` - If JSON encoding fails
pub fn render_entry(entry: &CommandEntry, format: PrintFormat) -> Result<String> {
    if !entry.kind.is_queueable() {
        return Err(TelecmdError::InvalidInQueue {
            entry_index: entry.entry_index,
            kind: entry.kind,
        });
    }

    match format {
        PrintFormat::Json => Ok(serde_json::to_string(entry)?),
        PrintFormat::Tuple => Ok(match entry.kind {
            CommandKind::Delete => format!("({}, {})", entry.entry_index, entry.target_index),
            CommandKind::Modify => format!(
                "({}, {}, {})",
                entry.entry_index, entry.target_index, entry.new_data
            ),
            _ => format!(
                "({}, {}, {})",
                entry.entry_index, entry.priority, entry.data
            ),
        }),
    }
}

/// Write every entry head to tail, one line each
///
/// Unrenderable entries are collected in the report and skipped; the rest
/// of the queue is still printed.
///
/// # Errors
/// * `Output` - If writing to the sink fails; printing stops there
pub fn print_queue(store: &QueueStore, out: &mut dyn Write, format: PrintFormat) -> Result<PrintReport> {
    let mut report = PrintReport::default();

    for entry in store.iter() {
        match render_entry(entry, format) {
            Ok(line) => {
                writeln!(out, "{}", line)?;
                report.lines += 1;
            }
            Err(e) => report.errors.push(e),
        }
    }
    out.flush()?;

    Ok(report)
}

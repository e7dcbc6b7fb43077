//! Request types representing every telecommand the interpreter understands
//!
//! A `Request` is the structured form of one batch record. Requests are
//! processed by the `dispatch()` function, which either queues them or runs
//! a utility operation on the queue immediately.

use crate::model::{CommandEntry, CommandKind};

/// Request enum covering the eight telecommand codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Queue a new command with priority 0
    NewLowPriority { data: u32 },

    /// Queue a new command with a caller-supplied priority
    NewWithPriority { priority: u32, data: u32 },

    /// Queue a deletion of the entry carrying `target_index`
    Delete { target_index: u32 },

    /// Sort the queue by descending priority
    Sort,

    /// Queue a data overwrite of the entry carrying `target_index`
    Modify { target_index: u32, new_data: u32 },

    /// Print every queued entry head to tail
    Print,

    /// Reverse the queue
    Reverse,

    /// Drain the queue, applying queued deletes and modifies
    Execute,
}

impl Request {
    pub fn kind(&self) -> CommandKind {
        match self {
            Request::NewLowPriority { .. } => CommandKind::NewLowPriority,
            Request::NewWithPriority { .. } => CommandKind::NewWithPriority,
            Request::Delete { .. } => CommandKind::Delete,
            Request::Sort => CommandKind::Sort,
            Request::Modify { .. } => CommandKind::Modify,
            Request::Print => CommandKind::Print,
            Request::Reverse => CommandKind::Reverse,
            Request::Execute => CommandKind::Execute,
        }
    }

    pub fn is_queueable(&self) -> bool {
        self.kind().is_queueable()
    }

    /// Build the queue entry for this request
    ///
    /// Returns `None` for utility requests, which are never stored.
    pub fn to_entry(&self, entry_index: u32) -> Option<CommandEntry> {
        let entry = CommandEntry::new(entry_index, self.kind());
        match *self {
            Request::NewLowPriority { data } => Some(entry.with_data(data)),
            Request::NewWithPriority { priority, data } => {
                Some(entry.with_priority(priority).with_data(data))
            }
            Request::Delete { target_index } => Some(entry.with_target(target_index)),
            Request::Modify {
                target_index,
                new_data,
            } => Some(entry.with_target(target_index).with_new_data(new_data)),
            Request::Sort | Request::Print | Request::Reverse | Request::Execute => None,
        }
    }
}

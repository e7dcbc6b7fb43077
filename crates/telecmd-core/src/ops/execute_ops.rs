//! Execution pass
//!
//! Drains the queue head to tail. Queued deletes and modifies are applied
//! to their targets; every visited entry is removed afterwards, whether or
//! not its action succeeded. The traversal order is snapshotted up front so
//! removals made by earlier entries never disturb the walk.

use super::mutation_ops::{delete_by_target, modify_by_target};
use super::store::QueueStore;
use crate::errors::{Result, TelecmdError};
use crate::model::{CommandEntry, CommandKind};

/// What executing a single entry did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEffect {
    /// New-command entry; nothing to apply
    Informational,
    /// Target entry removed
    Deleted { target_index: u32 },
    /// Target entry's data overwritten
    Modified { target_index: u32 },
    /// Target was issued earlier but is already gone
    TargetGone { target_index: u32 },
    /// Delete pointed at its own index and was skipped
    SelfTarget,
}

/// Outcome of one execution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionReport {
    /// Entries whose action was attempted
    pub visited: usize,
    pub deletes_applied: usize,
    pub modifies_applied: usize,
    /// Deletes/modifies whose target had already been removed
    pub silent_noops: usize,
    /// Entries removed by an earlier delete in the same pass, never visited
    pub removed_before_visit: usize,
    /// Reported failures, in visiting order
    pub errors: Vec<TelecmdError>,
}

/// Drain the queue, applying every queued action
///
/// The queue is empty when this returns, regardless of its starting
/// content or of how many actions failed.
pub fn execute_queue(store: &mut QueueStore) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for entry_index in store.entry_indices() {
        let Some(entry) = store.find(entry_index).cloned() else {
            report.removed_before_visit += 1;
            continue;
        };
        report.visited += 1;

        match execute_entry(store, &entry) {
            Ok(EntryEffect::Deleted { .. }) => report.deletes_applied += 1,
            Ok(EntryEffect::Modified { .. }) => report.modifies_applied += 1,
            Ok(EntryEffect::TargetGone { .. }) => report.silent_noops += 1,
            Ok(EntryEffect::Informational) | Ok(EntryEffect::SelfTarget) => {}
            Err(e) => report.errors.push(e),
        }

        if let Err(e) = store.remove(entry_index) {
            report.errors.push(e);
        }
    }

    debug_assert!(store.is_empty());
    tracing::debug!(
        visited = report.visited,
        errors = report.errors.len(),
        "queue drained"
    );
    report
}

/// Apply the action of a single entry without removing it
///
/// # Errors
/// * `InvalidInQueue` - If the entry has a utility kind
/// * `EntryNotFound` - If the target was never issued by this store
pub fn execute_entry(store: &mut QueueStore, entry: &CommandEntry) -> Result<EntryEffect> {
    match entry.kind {
        CommandKind::NewLowPriority | CommandKind::NewWithPriority => {
            Ok(EntryEffect::Informational)
        }

        CommandKind::Delete => {
            if entry.target_index == entry.entry_index {
                tracing::warn!(
                    entry_index = entry.entry_index,
                    "queued delete targets itself; skipped"
                );
                return Ok(EntryEffect::SelfTarget);
            }
            let target_index = entry.target_index;
            let outcome = delete_by_target(store, target_index);
            resolve_target(store, target_index, outcome).map(|applied| {
                if applied {
                    EntryEffect::Deleted { target_index }
                } else {
                    EntryEffect::TargetGone { target_index }
                }
            })
        }

        CommandKind::Modify => {
            let target_index = entry.target_index;
            let outcome = modify_by_target(store, target_index, entry.new_data);
            resolve_target(store, target_index, outcome).map(|applied| {
                if applied {
                    EntryEffect::Modified { target_index }
                } else {
                    EntryEffect::TargetGone { target_index }
                }
            })
        }

        CommandKind::Sort | CommandKind::Print | CommandKind::Reverse | CommandKind::Execute => {
            Err(TelecmdError::InvalidInQueue {
                entry_index: entry.entry_index,
                kind: entry.kind,
            })
        }
    }
}

/// Classify a targeted action's outcome
///
/// `Ok(true)` when applied, `Ok(false)` when the target existed once but has
/// already been removed, and the lookup error when it never existed.
fn resolve_target<T>(store: &QueueStore, target_index: u32, outcome: Result<T>) -> Result<bool> {
    match outcome {
        Ok(_) => Ok(true),
        Err(TelecmdError::EntryNotFound { .. }) if store.was_issued(target_index) => {
            tracing::debug!(target_index, "target already removed; no-op");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

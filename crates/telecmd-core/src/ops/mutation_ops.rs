use super::store::QueueStore;
use crate::commands::Request;
use crate::errors::{Result, TelecmdError};
use crate::model::CommandEntry;

/// Queue a request as a new entry at the head of the queue
///
/// Assigns the next entry index and advances the store's counter. Arena
/// space is reserved before the index is issued, so a failed allocation
/// leaves both the queue and the counter untouched.
///
/// # Arguments
/// * `store` - Mutable reference to the QueueStore
/// * `request` - A new, delete or modify request
///
/// # Returns
/// The entry index assigned to the new entry
///
/// # Errors
/// * `NotQueueable` - If the request is a utility request
/// * `AllocationFailed` - If storage for the entry cannot be reserved
pub fn enqueue(store: &mut QueueStore, request: &Request) -> Result<u32> {
    let entry = request
        .to_entry(store.next_entry_index())
        .ok_or(TelecmdError::NotQueueable {
            kind: request.kind(),
        })?;

    store.reserve()?;
    let entry_index = store.issue_index();
    debug_assert_eq!(entry_index, entry.entry_index);
    store.insert_front(entry)?;

    tracing::debug!(
        entry_index,
        kind = %request.kind(),
        queue_len = store.len(),
        "entry queued"
    );
    Ok(entry_index)
}

/// Remove the entry whose index equals `target_index`
///
/// # Returns
/// The removed entry
///
/// # Errors
/// * `EntryNotFound` - If no entry carries `target_index`; the queue is unchanged
pub fn delete_by_target(store: &mut QueueStore, target_index: u32) -> Result<CommandEntry> {
    let removed = store.remove(target_index)?;
    tracing::debug!(target_index, queue_len = store.len(), "entry deleted");
    Ok(removed)
}

/// Overwrite the `data` field of the entry whose index equals `target_index`
///
/// Modification happens in place; the entry keeps its position and index.
///
/// # Returns
/// The previous `data` value
///
/// # Errors
/// * `EntryNotFound` - If no entry carries `target_index`; the queue is unchanged
pub fn modify_by_target(store: &mut QueueStore, target_index: u32, new_data: u32) -> Result<u32> {
    let entry = store
        .find_mut(target_index)
        .ok_or(TelecmdError::EntryNotFound {
            entry_index: target_index,
        })?;
    let previous = std::mem::replace(&mut entry.data, new_data);
    tracing::debug!(target_index, previous, new_data, "entry modified");
    Ok(previous)
}

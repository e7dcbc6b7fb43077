use super::store::QueueStore;

/// Reverse the queue in place
///
/// Every node's predecessor and successor links are exchanged in a single
/// walk, then head and tail swap. Empty and single-entry queues come out
/// unchanged.
pub fn reverse_queue(store: &mut QueueStore) {
    let (head, tail) = store.ends();

    let mut cursor = head;
    while let Some(slot) = cursor {
        let next = store.next_of(slot);
        store.flip_links(slot);
        cursor = next;
    }

    store.set_ends(tail, head);
    tracing::debug!(queue_len = store.len(), "queue reversed");
}

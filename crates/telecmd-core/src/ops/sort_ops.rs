//! Priority ordering of the queue
//!
//! Iterative bottom-up merge sort over the linked list. Each pass cuts the
//! list into runs of `width` nodes, merges adjacent runs by relinking nodes
//! (entries are never copied or moved in the arena), and doubles `width`
//! until a single run covers the whole list.
//!
//! Ordering is by descending priority. The merge takes from the left run
//! when priorities are equal, so the sort is stable.

use super::store::{QueueStore, Slot};

/// Merge comparator: whether an entry with priority `left` goes before one
/// with priority `right`
pub fn takes_precedence(left: u32, right: u32) -> bool {
    left >= right
}

/// Sort the queue by descending priority
///
/// Empty and single-entry queues are left untouched.
///
/// # Returns
/// The number of merge passes performed
pub fn sort_queue(store: &mut QueueStore) -> usize {
    let len = store.len();
    let mut width = 1usize;
    let mut passes = 0usize;

    while width < len {
        merge_pass(store, width);
        passes += 1;
        width = width.saturating_mul(2);
    }

    tracing::debug!(queue_len = len, passes, "queue sorted");
    passes
}

/// Whether priorities read head to tail are non-increasing
pub fn is_priority_ordered(store: &QueueStore) -> bool {
    let priorities: Vec<u32> = store.iter().map(|e| e.priority).collect();
    priorities.windows(2).all(|w| w[0] >= w[1])
}

fn merge_pass(store: &mut QueueStore, width: usize) {
    let mut remaining = store.head_slot();
    let mut merged: Option<(Slot, Slot)> = None;

    while let Some(left) = remaining {
        let right = cut_after(store, left, width);
        remaining = match right {
            Some(right) => cut_after(store, right, width),
            None => None,
        };

        let (run_head, run_tail) = merge_runs(store, left, right);
        merged = Some(match merged {
            None => (run_head, run_tail),
            Some((head, tail)) => {
                store.link(tail, run_head);
                (head, run_tail)
            }
        });
    }

    if let Some((head, tail)) = merged {
        store.set_prev(head, None);
        store.set_next(tail, None);
        store.set_ends(Some(head), Some(tail));
    }
}

/// Detach the run of at most `width` nodes starting at `start`
///
/// Returns the first node after the run, itself detached from the run.
fn cut_after(store: &mut QueueStore, start: Slot, width: usize) -> Option<Slot> {
    let mut last = start;
    for _ in 1..width {
        match store.next_of(last) {
            Some(next) => last = next,
            None => break,
        }
    }

    let rest = store.next_of(last);
    store.set_next(last, None);
    if let Some(rest) = rest {
        store.set_prev(rest, None);
    }
    rest
}

/// Merge two detached runs into one, returning its (head, tail)
fn merge_runs(store: &mut QueueStore, left: Slot, right: Option<Slot>) -> (Slot, Slot) {
    let mut a = Some(left);
    let mut b = right;
    let mut head: Option<Slot> = None;
    let mut tail: Option<Slot> = None;

    while let (Some(x), Some(y)) = (a, b) {
        let taken = if takes_precedence(store.priority_of(x), store.priority_of(y)) {
            a = store.next_of(x);
            x
        } else {
            b = store.next_of(y);
            y
        };
        match tail {
            Some(t) => store.link(t, taken),
            None => {
                store.set_prev(taken, None);
                head = Some(taken);
            }
        }
        tail = Some(taken);
    }

    // Splice whichever run still has nodes onto the merged tail
    if let Some(rest) = a.or(b) {
        match tail {
            Some(t) => store.link(t, rest),
            None => head = Some(rest),
        }
        let mut last = rest;
        while let Some(next) = store.next_of(last) {
            last = next;
        }
        tail = Some(last);
    }

    let head = head.unwrap_or(left);
    (head, tail.unwrap_or(head))
}

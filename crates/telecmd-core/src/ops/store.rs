use crate::errors::{Result, TelecmdError};
use crate::model::CommandEntry;

/// Stable handle of a node inside the store's arena
pub(crate) type Slot = usize;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) entry: CommandEntry,
    pub(crate) prev: Option<Slot>,
    pub(crate) next: Option<Slot>,
}

/// In-memory telecommand queue
///
/// A doubly-linked list whose nodes live in an arena (`Vec<Node>`) and link
/// to each other by slot handle. Unlinked slots go on a free list and are
/// recycled by later inserts; entry indices are never recycled.
///
/// Not thread-safe (no Arc/RwLock) - designed for single-threaded use.
/// Lookups by entry index walk the list; there is no auxiliary index.
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    nodes: Vec<Node>,
    free: Vec<Slot>,
    head: Option<Slot>,
    tail: Option<Slot>,
    len: usize,
    /// Next entry index to hand out
    next_index: u32,
    /// Set once the index counter has wrapped past `u32::MAX`
    wrapped: bool,
}

impl QueueStore {
    /// Create a new empty QueueStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently linked
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The index the next enqueued entry will receive
    pub fn next_entry_index(&self) -> u32 {
        self.next_index
    }

    /// Whether `entry_index` has ever been handed out by this store
    ///
    /// Distinguishes targets that were removed (issued, now gone) from
    /// targets that never existed.
    pub fn was_issued(&self, entry_index: u32) -> bool {
        self.wrapped || entry_index < self.next_index
    }

    /// Hand out the next entry index and advance the counter
    ///
    /// The counter wraps silently on overflow.
    pub(crate) fn issue_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index = self.next_index.wrapping_add(1);
        if self.next_index == 0 {
            self.wrapped = true;
        }
        index
    }

    /// Make sure one more node fits without reallocating mid-insert
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the arena cannot grow.
    pub fn reserve(&mut self) -> Result<()> {
        if !self.free.is_empty() {
            return Ok(());
        }
        self.nodes
            .try_reserve(1)
            .map_err(|e| TelecmdError::AllocationFailed {
                reason: e.to_string(),
            })
    }

    /// Link an entry at the head of the queue
    ///
    /// The entry goes to the front regardless of its kind or priority.
    /// Callers are responsible for the uniqueness of `entry.entry_index`;
    /// `mutation_ops::enqueue` is the index-assigning entry point.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the arena cannot grow; the queue is
    /// left unchanged.
    pub fn insert_front(&mut self, entry: CommandEntry) -> Result<()> {
        self.reserve()?;

        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
        Ok(())
    }

    /// Get an entry by index
    pub fn find(&self, entry_index: u32) -> Option<&CommandEntry> {
        let slot = self.find_slot(entry_index)?;
        Some(&self.nodes[slot].entry)
    }

    /// Get a mutable reference to an entry by index
    pub fn find_mut(&mut self, entry_index: u32) -> Option<&mut CommandEntry> {
        let slot = self.find_slot(entry_index)?;
        Some(&mut self.nodes[slot].entry)
    }

    pub fn contains(&self, entry_index: u32) -> bool {
        self.find_slot(entry_index).is_some()
    }

    /// Unlink and return the entry carrying `entry_index`
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if no linked entry carries the index; the
    /// queue is left unchanged.
    pub fn remove(&mut self, entry_index: u32) -> Result<CommandEntry> {
        let slot = self
            .find_slot(entry_index)
            .ok_or(TelecmdError::EntryNotFound { entry_index })?;
        Ok(self.unlink(slot))
    }

    /// Entry at the front of the queue
    pub fn head(&self) -> Option<&CommandEntry> {
        self.head.map(|slot| &self.nodes[slot].entry)
    }

    /// Entry at the back of the queue
    pub fn tail(&self) -> Option<&CommandEntry> {
        self.tail.map(|slot| &self.nodes[slot].entry)
    }

    /// Iterate entries head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Iterate entries tail to head, following the backward links
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.tail,
            forward: false,
        }
    }

    /// Snapshot of the current traversal order as entry indices
    pub fn entry_indices(&self) -> Vec<u32> {
        self.iter().map(|e| e.entry_index).collect()
    }

    /// Drop every entry; the index counter keeps counting
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Verify the link structure
    ///
    /// Checks that forward and backward links are mutual, that the head has
    /// no predecessor and the tail no successor, and that both directions
    /// visit exactly `len()` nodes.
    ///
    /// # Errors
    ///
    /// Returns `LinkIntegrity` describing the first violation found.
    pub fn validate_links(&self) -> Result<()> {
        let violation = |reason: String| TelecmdError::LinkIntegrity { reason };

        if let Some(head) = self.head {
            if self.nodes[head].prev.is_some() {
                return Err(violation("head has a predecessor".to_string()));
            }
        }

        let mut count = 0usize;
        let mut prev: Option<Slot> = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            count += 1;
            if count > self.len {
                return Err(violation(format!(
                    "forward walk exceeds length {}",
                    self.len
                )));
            }
            let node = &self.nodes[slot];
            if node.prev != prev {
                return Err(violation(format!(
                    "entry {} has a predecessor link that does not mirror its neighbour",
                    node.entry.entry_index
                )));
            }
            prev = Some(slot);
            cursor = node.next;
        }

        if prev != self.tail {
            return Err(violation("tail does not match last reachable node".to_string()));
        }
        if count != self.len {
            return Err(violation(format!(
                "forward walk visited {} nodes, length is {}",
                count, self.len
            )));
        }
        if self.iter_rev().take(self.len + 1).count() != self.len {
            return Err(violation("backward walk length mismatch".to_string()));
        }
        Ok(())
    }

    // ===== Link primitives used by the sort, reverse and drain passes =====

    pub(crate) fn head_slot(&self) -> Option<Slot> {
        self.head
    }

    pub(crate) fn next_of(&self, slot: Slot) -> Option<Slot> {
        self.nodes[slot].next
    }

    pub(crate) fn priority_of(&self, slot: Slot) -> u32 {
        self.nodes[slot].entry.priority
    }

    pub(crate) fn set_next(&mut self, slot: Slot, next: Option<Slot>) {
        self.nodes[slot].next = next;
    }

    pub(crate) fn set_prev(&mut self, slot: Slot, prev: Option<Slot>) {
        self.nodes[slot].prev = prev;
    }

    /// Make `slot` the successor of `prev` (and `prev` the predecessor of `slot`)
    pub(crate) fn link(&mut self, prev: Slot, slot: Slot) {
        self.nodes[prev].next = Some(slot);
        self.nodes[slot].prev = Some(prev);
    }

    /// Exchange a node's predecessor and successor links
    pub(crate) fn flip_links(&mut self, slot: Slot) {
        let node = &mut self.nodes[slot];
        std::mem::swap(&mut node.prev, &mut node.next);
    }

    pub(crate) fn set_ends(&mut self, head: Option<Slot>, tail: Option<Slot>) {
        self.head = head;
        self.tail = tail;
    }

    pub(crate) fn ends(&self) -> (Option<Slot>, Option<Slot>) {
        (self.head, self.tail)
    }

    fn find_slot(&self, entry_index: u32) -> Option<Slot> {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = &self.nodes[slot];
            if node.entry.entry_index == entry_index {
                return Some(slot);
            }
            cursor = node.next;
        }
        None
    }

    fn unlink(&mut self, slot: Slot) -> CommandEntry {
        let (prev, next) = (self.nodes[slot].prev, self.nodes[slot].next);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[slot];
        node.prev = None;
        node.next = None;
        let entry = node.entry.clone();
        self.free.push(slot);
        self.len -= 1;
        entry
    }
}

/// Iterator over queue entries in link order
pub struct Iter<'a> {
    store: &'a QueueStore,
    cursor: Option<Slot>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CommandEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let store = self.store;
        let node = &store.nodes[slot];
        self.cursor = if self.forward { node.next } else { node.prev };
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a QueueStore {
    type Item = &'a CommandEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

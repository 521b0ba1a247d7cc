//! Binary min-heap priority queue for the search frontier.
//!
//! Entries are `(item, priority)` pairs; index 0 is always the minimum.
//! The heap performs no item deduplication: the same node may be live under
//! several priorities at once, and stale entries are discarded lazily by the
//! consumer's visited check. `pop()` on an empty heap is a defined terminal
//! signal (`None`), not an error.

/// An `(item, priority)` pair stored in the heap's backing vector.
#[derive(Debug, Clone)]
struct HeapEntry<T> {
    item: T,
    priority: u32,
}

/// Binary min-heap keyed by a `u32` priority.
///
/// Invariant: for every non-root index `i`,
/// `entries[i].priority >= entries[parent(i)].priority`.
///
/// All comparisons are strict, so entries with equal priorities are never
/// swapped past each other.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    entries: Vec<HeapEntry<T>>,
}

impl<T> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty heap with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert an item with the given priority. O(log n), never fails.
    pub fn add(&mut self, item: T, priority: u32) {
        self.entries.push(HeapEntry { item, priority });
        self.bubble_up(self.entries.len() - 1);
    }

    /// Remove and return the item with the smallest priority.
    ///
    /// Returns `None` when the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.bubble_down(0);
        }
        Some(entry.item)
    }

    /// The current minimum, without removing it.
    pub fn peek(&self) -> Option<(&T, u32)> {
        self.entries.first().map(|e| (&e.item, e.priority))
    }

    /// Number of live entries (stale duplicates included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries in backing-array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&T, u32)> + '_ {
        self.entries.iter().map(|e| (&e.item, e.priority))
    }

    /// Restore the heap invariant upward from `idx` after an append.
    fn bubble_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].priority > self.entries[idx].priority {
                self.entries.swap(parent, idx);
                idx = parent;
            } else {
                break;
            }
        }
    }

    /// Restore the heap invariant downward from `idx` after a root swap.
    ///
    /// Descends into whichever child has the smaller priority; ties between
    /// children break toward the left (lower index).
    fn bubble_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            if left >= len {
                break;
            }
            let mut child = left;
            if right < len && self.entries[right].priority < self.entries[left].priority {
                child = right;
            }
            if self.entries[child].priority < self.entries[idx].priority {
                self.entries.swap(child, idx);
                idx = child;
            } else {
                break;
            }
        }
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry for a frontier cell.
///
/// Entries are never removed in place: a re-ranked cell gets a fresh entry
/// and the superseded one is skipped when popped (its `g` no longer matches
/// the node).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) g: i32,
    seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, g, seq) first.
        (other.f, other.g, other.seq).cmp(&(self.f, self.g, self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue over `(fScore, gScore, insertion order)`.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    seq: u64,
}

impl OpenSet {
    pub(crate) fn push(&mut self, idx: usize, f: i32, g: i32) {
        self.heap.push(OpenEntry {
            idx,
            f,
            g,
            seq: self.seq,
        });
        self.seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }
}

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::search::arena::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    node: NodeId,
}

// Reversed so the std max-heap pops the lowest priority first,
// and the earliest push among equal priorities.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority frontier with FIFO order among equal priorities.
///
/// There is no decrease-key: a cheaper path is pushed as a second entry and
/// the caller discards the stale one when it surfaces.
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, node: NodeId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

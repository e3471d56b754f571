//! Priority queue for search frontiers.
//!
//! Entries are stored in a min-heap keyed by `(priority, insertion_order)`.
//! An [`Order`] decides which priority comes out first; ties are broken by
//! insertion order (FIFO) so searches are reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::marker::PhantomData;

/// Ordering of priorities in a [`PriorityQueue`].
pub trait Order<K> {
    /// [`Ordering::Less`] when `a` should be popped before `b`.
    ///
    /// Must be a total order over every priority that gets pushed.
    fn compare(a: &K, b: &K) -> Ordering;
}

/// Smallest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

/// Largest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

/// A priority that does not compare equal to itself, such as NaN.
fn is_unordered<K: PartialOrd>(k: &K) -> bool {
    k.partial_cmp(k).is_none()
}

/// Unordered priorities sort after every ordered one and tie among
/// themselves.
fn unordered_last<K: PartialOrd>(ord: Option<Ordering>, a: &K, b: &K) -> Ordering {
    ord.unwrap_or_else(|| is_unordered(a).cmp(&is_unordered(b)))
}

impl<K: PartialOrd> Order<K> for MinFirst {
    fn compare(a: &K, b: &K) -> Ordering {
        unordered_last(a.partial_cmp(b), a, b)
    }
}

impl<K: PartialOrd> Order<K> for MaxFirst {
    fn compare(a: &K, b: &K) -> Ordering {
        unordered_last(b.partial_cmp(a), a, b)
    }
}

/// An entry in the queue.
struct Entry<T, K, O> {
    item: T,
    priority: K,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
    order: PhantomData<fn() -> O>,
}

impl<T, K, O: Order<K>> PartialEq for Entry<T, K, O> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, K, O: Order<K>> Eq for Entry<T, K, O> {}

impl<T, K, O: Order<K>> PartialOrd for Entry<T, K, O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K, O: Order<K>> Ord for Entry<T, K, O> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: whatever pops first is smaller. The heap holds
        // `Reverse` entries.
        O::compare(&self.priority, &other.priority).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A priority queue over `(item, priority)` pairs.
///
/// [`min_first`](Self::min_first) and [`max_first`](Self::max_first) cover
/// the usual cases; any other ordering is supplied as an [`Order`] type.
pub struct PriorityQueue<T, K, O = MinFirst> {
    heap: BinaryHeap<Reverse<Entry<T, K, O>>>,
    seq: u64,
}

impl<T, K: PartialOrd> PriorityQueue<T, K, MinFirst> {
    /// Queue popping the smallest priority first.
    pub fn min_first() -> Self {
        Self::new()
    }
}

impl<T, K: PartialOrd> PriorityQueue<T, K, MaxFirst> {
    /// Queue popping the largest priority first.
    pub fn max_first() -> Self {
        Self::new()
    }
}

impl<T, K, O: Order<K>> PriorityQueue<T, K, O> {
    /// Create an empty queue ordered by `O`.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push an item at the given priority.
    pub fn push(&mut self, item: T, priority: K) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
            order: PhantomData,
        }));
    }

    /// Pop the extremal entry (ties broken FIFO).
    pub fn pop(&mut self) -> Option<(T, K)> {
        self.heap
            .pop()
            .map(|Reverse(e)| (e.item, e.priority))
    }

    /// The entry [`pop`](Self::pop) would return, without removing it.
    pub fn peek(&self) -> Option<(&T, &K)> {
        self.heap.peek().map(|Reverse(e)| (&e.item, &e.priority))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every entry. The tie-break counter keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T, K, O: Order<K>> Default for PriorityQueue<T, K, O> {
    fn default() -> Self {
        Self::new()
    }
}

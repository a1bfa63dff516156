use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::{describe, Error, Result};

#[derive(Debug, Clone)]
struct Entry<K, P> {
    priority: P,
    /// Insertion order, breaks ties between equal priorities
    seq: u64,
    key: K,
}

impl<K, P: Ord> Entry<K, P> {
    fn precedes(&self, other: &Self) -> bool {
        (&self.priority, self.seq) < (&other.priority, other.seq)
    }
}

/// A binary min-heap with a key index, supporting decrease-key
///
/// Every key is queued at most once. `pop` returns the key with the smallest
/// priority; among equal priorities the key inserted first wins.
#[derive(Debug)]
pub struct IndexedPriorityQueue<K, P>
where
    K: Clone + Eq + Hash + Debug,
    P: Ord + Copy + Debug,
{
    /// The heap array
    heap: Vec<Entry<K, P>>,

    /// Position of each queued key in `heap`
    positions: HashMap<K, usize>,

    next_seq: u64,
}

impl<K, P> Default for IndexedPriorityQueue<K, P>
where
    K: Clone + Eq + Hash + Debug,
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> IndexedPriorityQueue<K, P>
where
    K: Clone + Eq + Hash + Debug,
    P: Ord + Copy + Debug,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        IndexedPriorityQueue {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements in the priority queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if `key` is currently queued
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Current priority of a queued key
    pub fn priority(&self, key: &K) -> Option<P> {
        self.positions.get(key).map(|&pos| self.heap[pos].priority)
    }

    /// Inserts a key with the given priority.
    ///
    /// Returns false and leaves the queue unchanged if the key is already queued.
    pub fn push(&mut self, key: K, priority: P) -> bool {
        if self.positions.contains_key(&key) {
            return false;
        }

        let pos = self.heap.len();
        self.positions.insert(key.clone(), pos);
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            key,
        });
        self.next_seq += 1;
        self.sift_up(pos);
        true
    }

    /// Lowers the priority of a queued key
    pub fn decrease_key(&mut self, key: &K, priority: P) -> Result<()> {
        let pos = *self
            .positions
            .get(key)
            .ok_or_else(|| Error::KeyNotQueued(describe(key)))?;

        if priority > self.heap[pos].priority {
            return Err(Error::PriorityIncrease(describe(key)));
        }

        self.heap[pos].priority = priority;
        self.sift_up(pos);
        Ok(())
    }

    /// Removes and returns the key with the smallest priority
    pub fn pop(&mut self) -> Option<(K, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.priority))
    }

    /// Returns the key with the smallest priority without removing it
    pub fn peek(&self) -> Option<(&K, P)> {
        self.heap.first().map(|entry| (&entry.key, entry.priority))
    }

    /// Clears the priority queue
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.heap[pos].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].key.clone(), a);
        self.positions.insert(self.heap[b].key.clone(), b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pop_in_priority_order() {
        let mut queue = IndexedPriorityQueue::new();
        for (key, priority) in [("c", 3), ("a", 1), ("d", 4), ("b", 2)] {
            assert!(queue.push(key, priority));
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek(), Some((&"a", 1)));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicate_push_is_rejected() {
        let mut queue = IndexedPriorityQueue::new();
        assert!(queue.push(7, 10));
        assert!(!queue.push(7, 1));
        assert_eq!(queue.priority(&7), Some(10));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let mut queue = IndexedPriorityQueue::new();
        for key in ["x", "y", "z", "w"] {
            queue.push(key, 5);
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|(k, _)| k)).collect();
        assert_eq!(order, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_decrease_key() {
        let mut queue = IndexedPriorityQueue::new();
        queue.push("a", OrderedFloat(f64::INFINITY));
        queue.push("b", OrderedFloat(3.0));
        queue.push("c", OrderedFloat(2.0));

        queue.decrease_key(&"a", OrderedFloat(1.0)).unwrap();
        assert_eq!(queue.peek(), Some((&"a", OrderedFloat(1.0))));

        // Equal priority is accepted and changes nothing.
        queue.decrease_key(&"b", OrderedFloat(3.0)).unwrap();

        assert_eq!(
            queue.decrease_key(&"c", OrderedFloat(9.0)),
            Err(Error::PriorityIncrease("\"c\"".into()))
        );
        assert_eq!(
            queue.decrease_key(&"z", OrderedFloat(0.0)),
            Err(Error::KeyNotQueued("\"z\"".into()))
        );

        let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|(k, _)| k)).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
        assert!(!queue.contains(&"a"));
    }

    #[test]
    fn test_random_operations_keep_heap_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = IndexedPriorityQueue::new();
        let mut current = std::collections::HashMap::new();

        for key in 0..200u32 {
            let priority = rng.gen_range(0..1000u32);
            queue.push(key, priority);
            current.insert(key, priority);
        }
        for _ in 0..300 {
            let key = rng.gen_range(0..200u32);
            if let Some(p) = queue.priority(&key) {
                let lowered = p.saturating_sub(rng.gen_range(0..100));
                queue.decrease_key(&key, lowered).unwrap();
                current.insert(key, lowered);
            }
            if rng.gen_bool(0.2) {
                if let Some((key, _)) = queue.pop() {
                    current.remove(&key);
                }
            }
        }

        let mut last = 0;
        while let Some((key, priority)) = queue.pop() {
            assert!(priority >= last);
            assert_eq!(current.remove(&key), Some(priority));
            last = priority;
        }
        assert!(current.is_empty());
    }
}

//! Array-backed binary max-heap
//!
//! Parent of slot `i` is `(i - 1) / 2`, its children are `2i + 1` and `2i + 2`.
//! The maximum under `Ord` sits at slot 0. For [`Balance`](crate::Balance) nodes
//! that is the largest amount, ties going to the lexicographically smallest id,
//! so pop order is fully determined by the heap's contents.

/// Binary max-heap over any totally ordered node type
#[derive(Debug, Clone)]
pub struct MaxHeap<T> {
    data: Vec<T>,
}

impl<T: Ord> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MaxHeap<T> {
    /// Create empty heap
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create empty heap with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the heap holds no nodes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest node, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Insert a node
    pub fn push(&mut self, node: T) {
        self.data.push(node);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the largest node
    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.len().checked_sub(1)?;
        self.data.swap(0, last);
        let top = self.data.pop();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// Pop every node, largest first
    pub fn drain_sorted(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Some(node) = self.pop() {
            out.push(node);
        }
        out
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] <= self.data[parent] {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let n = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < n && self.data[left] > self.data[largest] {
                largest = left;
            }
            if right < n && self.data[right] > self.data[largest] {
                largest = right;
            }
            if largest == index {
                break;
            }

            self.data.swap(index, largest);
            index = largest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[(i - 1) / 2] >= self.data[i])
    }
}

impl<T: Ord> Extend<T> for MaxHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for node in iter {
            self.push(node);
        }
    }
}

impl<T: Ord> FromIterator<T> for MaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);
        heap.extend(iter);
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Balance;
    use proptest::prelude::*;

    #[test]
    fn test_empty_heap() {
        let mut heap: MaxHeap<Balance> = MaxHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(heap.peek().is_none());
        assert!(heap.pop().is_none());
    }

    #[test]
    fn test_pops_largest_first() {
        let mut heap = MaxHeap::new();
        heap.push(Balance::new("a", 300));
        heap.push(Balance::new("b", 5000));
        heap.push(Balance::new("c", 1200));
        heap.push(Balance::new("d", 1));

        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek().map(|b| b.amount), Some(5000));

        let amounts: Vec<u64> = heap.drain_sorted().into_iter().map(|b| b.amount).collect();
        assert_eq!(amounts, vec![5000, 1200, 300, 1]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_ties_break_on_id() {
        let heap: MaxHeap<Balance> = ["carol", "alice", "bob"]
            .into_iter()
            .map(|id| Balance::new(id, 100))
            .collect();

        let ids: Vec<String> = heap.clone().drain_sorted().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut heap = MaxHeap::new();
        heap.push(Balance::new("x", 10));
        heap.push(Balance::new("y", 20));
        assert_eq!(heap.pop().map(|b| b.id), Some("y".to_string()));

        heap.push(Balance::new("z", 15));
        heap.push(Balance::new("w", 15));
        assert!(heap.is_valid());
        assert_eq!(heap.pop().map(|b| b.id), Some("w".to_string()));
        assert_eq!(heap.pop().map(|b| b.id), Some("z".to_string()));
        assert_eq!(heap.pop().map(|b| b.id), Some("x".to_string()));
        assert!(heap.pop().is_none());
    }

    proptest! {
        #[test]
        fn prop_heap_property_holds(amounts in prop::collection::vec(0u64..1_000, 0..64)) {
            let mut heap = MaxHeap::new();
            for (i, amount) in amounts.iter().enumerate() {
                heap.push(Balance::new(format!("m{:03}", i), *amount));
                prop_assert!(heap.is_valid());
            }

            let mut previous: Option<Balance> = None;
            while let Some(top) = heap.pop() {
                prop_assert!(heap.is_valid());
                if let Some(prev) = &previous {
                    prop_assert!(*prev > top);
                }
                previous = Some(top);
            }
        }

        #[test]
        fn prop_matches_sorted_order(amounts in prop::collection::vec(1u64..50, 0..64)) {
            let nodes: Vec<Balance> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| Balance::new(format!("m{:03}", i), *a))
                .collect();

            let mut expected = nodes.clone();
            expected.sort_by(|a, b| b.cmp(a));

            let mut heap: MaxHeap<Balance> = nodes.into_iter().collect();
            prop_assert_eq!(heap.drain_sorted(), expected);
        }
    }
}

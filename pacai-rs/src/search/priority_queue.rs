use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Entry<K, P, V> {
    key: K,
    priority: P,
    sequence: u64,
    value: V,
}

/// A binary min-heap that also knows where each key lives in the heap
///
/// Every key is in the queue at most once. Pushing a key that is already queued with a better
/// priority lowers it in place instead of adding a second entry. Entries with equal priorities
/// come out in the order they were (last) pushed.
#[derive(Debug)]
pub struct IndexedPriorityQueue<K, P, V> {
    heap: Vec<Entry<K, P, V>>,
    positions: FxHashMap<K, usize>,
    next_sequence: u64,
}

impl<K, P, V> Default for IndexedPriorityQueue<K, P, V> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            positions: FxHashMap::default(),
            next_sequence: 0,
        }
    }
}

impl<K, P, V> IndexedPriorityQueue<K, P, V>
where
    K: Clone + Eq + Hash,
    P: Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn priority_of(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&i| &self.heap[i].priority)
    }

    pub fn peek(&self) -> Option<(&K, &P, &V)> {
        self.heap
            .first()
            .map(|entry| (&entry.key, &entry.priority, &entry.value))
    }

    /// Queue `key`, or lower its priority if it is already queued with a worse one
    ///
    /// Returns false (and leaves the queue alone) when the key is already queued with a priority
    /// at least as good as `priority`.
    pub fn push_or_decrease(&mut self, key: K, priority: P, value: V) -> bool {
        let sequence = self.next_sequence;

        if let Some(&index) = self.positions.get(&key) {
            if priority >= self.heap[index].priority {
                return false;
            }

            self.next_sequence += 1;
            let entry = &mut self.heap[index];
            entry.priority = priority;
            entry.sequence = sequence;
            entry.value = value;
            self.sift_up(index);

            return true;
        }

        self.next_sequence += 1;
        let index = self.heap.len();
        self.positions.insert(key.clone(), index);
        self.heap.push(Entry {
            key,
            priority,
            sequence,
            value,
        });
        self.sift_up(index);

        true
    }

    pub fn pop(&mut self) -> Option<(K, P, V)> {
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

        Some((entry.key, entry.priority, entry.value))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let a = &self.heap[a];
        let b = &self.heap[b];

        (&a.priority, a.sequence) < (&b.priority, b.sequence)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        self.heap.swap(a, b);

        if let Some(position) = self.positions.get_mut(&self.heap[a].key) {
            *position = a;
        }
        if let Some(position) = self.positions.get_mut(&self.heap[b].key) {
            *position = b;
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }

            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn drain<K: Clone + Eq + Hash, P: Ord, V>(
        queue: &mut IndexedPriorityQueue<K, P, V>,
    ) -> Vec<(K, P)> {
        std::iter::from_fn(|| queue.pop())
            .map(|(k, p, _)| (k, p))
            .collect_vec()
    }

    #[test]
    fn test_pops_in_priority_order() {
        let mut queue = IndexedPriorityQueue::new();

        for (key, priority) in [("e", 5), ("a", 1), ("d", 4), ("b", 2), ("c", 3), ("f", 0)] {
            assert!(queue.push_or_decrease(key, priority, ()));
        }

        assert_eq!(queue.len(), 6);
        assert_eq!(queue.peek().map(|(k, _, _)| *k), Some("f"));
        assert_eq!(
            drain(&mut queue),
            vec![("f", 0), ("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_are_first_in_first_out() {
        let mut queue = IndexedPriorityQueue::new();

        for key in ["first", "second", "third", "fourth", "fifth"] {
            queue.push_or_decrease(key, 1, ());
        }
        queue.push_or_decrease("zeroth", 0, ());

        assert_eq!(
            drain(&mut queue)
                .into_iter()
                .map(|(k, _)| k)
                .collect_vec(),
            vec!["zeroth", "first", "second", "third", "fourth", "fifth"]
        );
    }

    #[test]
    fn test_decrease_key_does_not_duplicate() {
        let mut queue = IndexedPriorityQueue::new();

        queue.push_or_decrease('a', 10, "slow");
        queue.push_or_decrease('b', 5, "b");
        queue.push_or_decrease('c', 7, "c");

        assert!(queue.push_or_decrease('a', 1, "fast"));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.priority_of(&'a'), Some(&1));

        assert_eq!(queue.pop(), Some(('a', 1, "fast")));
        assert_eq!(queue.pop(), Some(('b', 5, "b")));
        assert_eq!(queue.pop(), Some(('c', 7, "c")));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_worse_priority_is_ignored() {
        let mut queue = IndexedPriorityQueue::new();

        queue.push_or_decrease('a', 3, "original");

        assert!(!queue.push_or_decrease('a', 3, "same"));
        assert!(!queue.push_or_decrease('a', 8, "worse"));
        assert_eq!(queue.pop(), Some(('a', 3, "original")));
    }

    #[test]
    fn test_keys_can_come_back_after_popping() {
        let mut queue = IndexedPriorityQueue::new();

        queue.push_or_decrease('a', 3, ());
        assert_eq!(queue.pop(), Some(('a', 3, ())));
        assert!(!queue.contains(&'a'));

        assert!(queue.push_or_decrease('a', 9, ()));
        assert!(queue.contains(&'a'));
    }

    #[test]
    fn test_positions_stay_in_sync() {
        let mut queue = IndexedPriorityQueue::new();

        for i in 0..100u32 {
            queue.push_or_decrease(i, (i * 37) % 101, ());
        }
        for i in (0..100u32).step_by(3) {
            queue.push_or_decrease(i, 0, ());
        }

        let popped = drain(&mut queue);
        assert_eq!(popped.len(), 100);
        assert!(popped.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(
            popped.iter().take_while(|(_, p)| *p == 0).count(),
            // 0 started at priority 0, then every third key was lowered to it
            34
        );
    }
}

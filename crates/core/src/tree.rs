//! Order-statistic treap.
//!
//! A balanced search tree whose nodes carry subtree sizes, so that besides
//! ordered insert/remove it answers "how many keys are smaller than k"
//! ([`OrderStatisticTree::rank`]) and "which key sits at position i"
//! ([`OrderStatisticTree::select`]) in expected `O(log n)`.
//!
//! Node priorities come from a SplitMix64 sequence seeded per tree. The
//! same sequence of operations therefore always builds the same shape.

use std::cmp::Ordering;
use std::fmt;

/// SplitMix64 increment.
const SPLITMIX_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
struct Node<K> {
    key: K,
    priority: u64,
    /// Number of keys in the subtree rooted here, this node included.
    size: usize,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K, priority: u64) -> Self {
        Self {
            key,
            priority,
            size: 1,
            left: None,
            right: None,
        }
    }

    fn recount(&mut self) {
        self.size = 1 + link_size(&self.left) + link_size(&self.right);
    }
}

fn link_size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Split `link` into keys ordered before `key` and the rest.
///
/// With `inclusive`, a key equal to `key` goes to the left half.
fn split<K: Ord>(link: Link<K>, key: &K, inclusive: bool) -> (Link<K>, Link<K>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let goes_left = match node.key.cmp(key) {
        Ordering::Less => true,
        Ordering::Equal => inclusive,
        Ordering::Greater => false,
    };

    if goes_left {
        let (left, right) = split(node.right.take(), key, inclusive);
        node.right = left;
        node.recount();
        (Some(node), right)
    } else {
        let (left, right) = split(node.left.take(), key, inclusive);
        node.left = right;
        node.recount();
        (left, Some(node))
    }
}

/// Join two treaps where every key of `left` orders before every key of `right`.
fn merge<K>(left: Link<K>, right: Link<K>) -> Link<K> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            if left.priority >= right.priority {
                left.right = merge(left.right.take(), Some(right));
                left.recount();
                Some(left)
            } else {
                right.left = merge(Some(left), right.left.take());
                right.recount();
                Some(right)
            }
        }
    }
}

/// Ordered set with positional access.
#[derive(Clone)]
pub struct OrderStatisticTree<K> {
    root: Link<K>,
    priority_state: u64,
}

impl<K: Ord> OrderStatisticTree<K> {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create an empty tree whose node priorities derive from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            root: None,
            priority_state: seed,
        }
    }

    pub fn len(&self) -> usize {
        link_size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => link = node.right.as_deref(),
            }
        }
        false
    }

    /// Insert `key`. Returns `false` and leaves the tree untouched if an
    /// equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }

        let priority = self.next_priority();
        let (left, right) = split(self.root.take(), &key, false);
        let node = Some(Box::new(Node::new(key, priority)));
        self.root = merge(merge(left, node), right);
        true
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let (left, rest) = split(self.root.take(), key, false);
        // `rest` holds keys >= key, so its inclusive left half is `key` alone.
        let (matched, right) = split(rest, key, true);
        self.root = merge(left, right);
        matched.is_some()
    }

    /// Number of keys strictly less than `key`. Equals the 0-based position
    /// of `key` when it is present.
    pub fn rank(&self, key: &K) -> usize {
        let mut link = self.root.as_deref();
        let mut rank = 0;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return rank + link_size(&node.left),
                Ordering::Greater => {
                    rank += link_size(&node.left) + 1;
                    link = node.right.as_deref();
                }
            }
        }
        rank
    }

    /// Key at 0-based `position`, or `None` past the end.
    pub fn select(&self, position: usize) -> Option<&K> {
        let mut link = self.root.as_deref();
        let mut position = position;
        while let Some(node) = link {
            let left = link_size(&node.left);
            match position.cmp(&left) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    position -= left + 1;
                    link = node.right.as_deref();
                }
            }
        }
        None
    }

    /// In-order traversal of all keys.
    pub fn iter(&self) -> Iter<'_, K> {
        self.iter_from(0)
    }

    /// In-order traversal starting at 0-based `position`.
    pub fn iter_from(&self, position: usize) -> Iter<'_, K> {
        let len = self.len();
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len.saturating_sub(position),
        };
        if position >= len {
            return iter;
        }

        // Stack holds the target plus every ancestor we descended left from;
        // those are exactly the keys after the target that are not in its
        // right subtree.
        let mut link = self.root.as_deref();
        let mut position = position;
        while let Some(node) = link {
            let left = link_size(&node.left);
            match position.cmp(&left) {
                Ordering::Less => {
                    iter.stack.push(node);
                    link = node.left.as_deref();
                }
                Ordering::Equal => {
                    iter.stack.push(node);
                    break;
                }
                Ordering::Greater => {
                    position -= left + 1;
                    link = node.right.as_deref();
                }
            }
        }
        iter
    }

    fn next_priority(&mut self) -> u64 {
        self.priority_state = self.priority_state.wrapping_add(SPLITMIX_GAMMA);
        let mut z = self.priority_state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl<K: Ord> Default for OrderStatisticTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for OrderStatisticTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord> IntoIterator for &'a OrderStatisticTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderStatisticTree`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut link = node.right.as_deref();
        while let Some(child) = link {
            self.stack.push(child);
            link = child.left.as_deref();
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    /// Deterministic pseudo-random stream for workload generation.
    fn lcg(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        *state >> 33
    }

    #[test]
    fn test_empty_tree() {
        let tree: OrderStatisticTree<i32> = OrderStatisticTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.rank(&5), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut tree = OrderStatisticTree::new();
        assert!(tree.insert(3));
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_false() {
        let mut tree = OrderStatisticTree::new();
        tree.insert(1);
        assert!(!tree.remove(&2));
        assert!(tree.remove(&1));
        assert!(!tree.remove(&1));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_rank_and_select_agree() {
        let mut tree = OrderStatisticTree::new();
        for key in [50, 10, 40, 20, 30] {
            tree.insert(key);
        }

        for (position, key) in [10, 20, 30, 40, 50].iter().enumerate() {
            assert_eq!(tree.rank(key), position);
            assert_eq!(tree.select(position), Some(key));
        }
        assert_eq!(tree.select(5), None);

        // Absent keys rank by how many keys are smaller.
        assert_eq!(tree.rank(&0), 0);
        assert_eq!(tree.rank(&25), 2);
        assert_eq!(tree.rank(&99), 5);
    }

    #[test]
    fn test_iter_from_every_position() {
        let mut tree = OrderStatisticTree::new();
        for key in 0..32 {
            tree.insert(key * 3);
        }

        for start in 0..=33 {
            let got: Vec<i32> = tree.iter_from(start).copied().collect();
            let expected: Vec<i32> = (0..32).skip(start).map(|k| k * 3).collect();
            assert_eq!(got, expected, "iter_from({start})");
            assert_eq!(tree.iter_from(start).len(), expected.len());
        }
    }

    #[test]
    fn test_matches_btreeset_under_churn() {
        let mut tree = OrderStatisticTree::new();
        let mut model = BTreeSet::new();
        let mut state = 7;

        for _ in 0..4000 {
            let key = lcg(&mut state) % 500;
            if lcg(&mut state) % 3 == 0 {
                assert_eq!(tree.remove(&key), model.remove(&key));
            } else {
                assert_eq!(tree.insert(key), model.insert(key));
            }
        }

        assert_eq!(tree.len(), model.len());
        let keys: Vec<u64> = tree.iter().copied().collect();
        let expected: Vec<u64> = model.iter().copied().collect();
        assert_eq!(keys, expected);

        for (position, key) in model.iter().enumerate() {
            assert_eq!(tree.rank(key), position);
            assert_eq!(tree.select(position), Some(key));
        }
    }

    #[test]
    fn test_same_operations_same_shape() {
        fn build() -> Vec<(u32, usize)> {
            let mut tree = OrderStatisticTree::with_seed(11);
            for key in [9, 3, 7, 1, 5, 8, 2] {
                tree.insert(key);
            }
            tree.remove(&7);
            let mut shape = Vec::new();
            collect_shape(tree.root.as_deref(), &mut shape);
            shape
        }

        fn collect_shape(link: Option<&Node<u32>>, out: &mut Vec<(u32, usize)>) {
            if let Some(node) = link {
                out.push((node.key, node.size));
                collect_shape(node.left.as_deref(), out);
                collect_shape(node.right.as_deref(), out);
            }
        }

        assert_eq!(build(), build());
    }

    #[test]
    fn test_subtree_sizes_stay_consistent() {
        fn check(link: Option<&Node<u64>>) -> usize {
            let Some(node) = link else { return 0 };
            let size = 1 + check(node.left.as_deref()) + check(node.right.as_deref());
            assert_eq!(node.size, size);
            if let Some(left) = node.left.as_deref() {
                assert!(left.priority <= node.priority);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(right.priority <= node.priority);
            }
            size
        }

        let mut tree = OrderStatisticTree::new();
        let mut state = 99;
        for _ in 0..2000 {
            let key = lcg(&mut state) % 200;
            if lcg(&mut state) % 2 == 0 {
                tree.insert(key);
            } else {
                tree.remove(&key);
            }
        }
        assert_eq!(check(tree.root.as_deref()), tree.len());
    }
}

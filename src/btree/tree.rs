//! B+-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - bulkload: One-pass construction from sorted input
//! - find: Point lookups
//! - find_range: Half-open range queries
//! - equal_range: All pairs with one key

use super::bulkload::BulkLoader;
use super::cursor::{Cursor, Iter, IterMut, Range};
use super::layout::NodeLayout;
use super::node::{Arena, NodeRef};
use crate::error::{BTreeError, Result};
use crate::types::{LayoutInfo, LoadConfig};
use crate::{TreeNode, TreeStats};
use std::fmt;

/// A read-only B+-tree of `K`-`V` pairs whose nodes fit in `NODE_SIZE` bytes
/// aligned to `NODE_ALIGN` bytes.
///
/// The tree is built once by [`BTree::bulkload`]. Afterwards only values can
/// be modified in place; keys and structure never change.
pub struct BTree<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize = NODE_SIZE> {
    /// Owner of every node
    arena: Arena<K, V>,
    /// Root node (None means empty tree)
    root: Option<NodeRef>,
    /// Number of key-value pairs
    size: usize,
    /// Number of inner-node levels above the leaves
    height: usize,
}

impl<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> BTree<K, V, NODE_SIZE, NODE_ALIGN> {
    /// Number of key-value pairs per leaf
    pub const NUM_KEYS_PER_LEAF: usize = NodeLayout::<K, V, NODE_SIZE, NODE_ALIGN>::NUM_KEYS_PER_LEAF;
    /// Number of separator-child pairs per inner node
    pub const NUM_KEYS_PER_INODE: usize = NodeLayout::<K, V, NODE_SIZE, NODE_ALIGN>::NUM_KEYS_PER_INODE;

    /// Describe the node layout of this tree type
    pub fn layout() -> LayoutInfo {
        NodeLayout::<K, V, NODE_SIZE, NODE_ALIGN>::info()
    }

    /// Get the number of key-value pairs
    pub fn size(&self) -> usize {
        self.size
    }

    /// Same as [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get the number of inner-node levels; a tree whose root is a leaf has
    /// height 0
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cursor at the smallest pair, or `end()` for an empty tree
    pub fn begin(&self) -> Cursor {
        self.root
            .and_then(|root| self.arena.first_leaf(root))
            .map_or_else(Cursor::default, |leaf| Cursor::at_slot(&self.arena, leaf, 0))
    }

    /// The past-the-end cursor
    pub fn end(&self) -> Cursor {
        self.root
            .and_then(|root| self.arena.last_leaf(root))
            .map_or_else(Cursor::default, |leaf| {
                Cursor::at_slot(&self.arena, leaf, self.arena.leaf(leaf).len())
            })
    }

    /// The pair under `cursor`, `None` at the end
    pub fn get(&self, cursor: Cursor) -> Option<(&K, &V)> {
        cursor.get(&self.arena)
    }

    /// Mutable access to the value under `cursor`
    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        let leaf = self.arena.leaves.get_mut(cursor.leaf()?.index())?;
        leaf.entries_mut()
            .get_mut(cursor.position())
            .map(|(_, value)| value)
    }

    /// Move `cursor` one pair forward. A cursor at `end()` stays there.
    pub fn advance(&self, cursor: &mut Cursor) {
        cursor.advance(&self.arena);
    }

    /// The whole tree as a range
    pub fn range(&self) -> Range<'_, K, V> {
        Range::new(&self.arena, self.begin(), self.end())
    }

    /// Iterate over all pairs in key order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.range().iter()
    }

    /// Iterate over all pairs in key order with mutable values
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (begin, end) = (self.begin(), self.end());
        IterMut::new(&mut self.arena, begin, end)
    }

    /// The smallest pair
    pub fn first(&self) -> Option<(&K, &V)> {
        self.get(self.begin())
    }

    /// The largest pair
    pub fn last(&self) -> Option<(&K, &V)> {
        let leaf = self.arena.last_leaf(self.root?)?;
        self.arena.leaf(leaf).max_pair().map(|(k, v)| (k, v))
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            size: self.size,
            height: self.height,
            leaf_count: self.arena.leaves.len(),
            inner_count: self.arena.inners.len(),
            layout: Self::layout(),
        }
    }
}

impl<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> BTree<K, V, NODE_SIZE, NODE_ALIGN>
where
    K: Ord + Clone,
{
    /// Bulk-load pairs sorted ascending by key into a fresh tree
    pub fn bulkload<I>(input: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::bulkload_with_config(input, LoadConfig::default())
    }

    /// Bulk-load with explicit options
    pub fn bulkload_with_config<I>(input: I, config: LoadConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let () = NodeLayout::<K, V, NODE_SIZE, NODE_ALIGN>::ASSERT_VALID;

        let loader = BulkLoader::new(Self::NUM_KEYS_PER_LEAF, Self::NUM_KEYS_PER_INODE, config)?;
        let loaded = loader.load(input)?;

        Ok(Self {
            arena: loaded.arena,
            root: loaded.root,
            size: loaded.size,
            height: loaded.height,
        })
    }

    /// Cursor at the first pair whose key is not less than `key`, or `end()`
    fn seek(&self, key: &K) -> Cursor {
        let Some(leaf) = self.root.and_then(|root| self.arena.find_leaf(root, key)) else {
            return self.end();
        };
        let pos = self.arena.leaf(leaf).lower_bound(key);
        let mut cursor = Cursor::at_slot(&self.arena, leaf, pos).normalize(&self.arena);

        // Descent lands within one leaf of the bound; step over any stragglers
        let end = self.end();
        while cursor != end && self.get(cursor).is_some_and(|(k, _)| k < key) {
            cursor.advance(&self.arena);
        }
        cursor
    }

    /// Cursor at the first pair with exactly `key`, or `end()`
    pub fn find(&self, key: &K) -> Cursor {
        let cursor = self.seek(key);
        match self.get(cursor) {
            Some((k, _)) if k == key => cursor,
            _ => self.end(),
        }
    }

    /// Value of the first pair with `key`
    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.get(self.find(key)).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key) != self.end()
    }

    fn range_bounds(&self, lo: &K, hi: &K) -> (Cursor, Cursor) {
        let begin = self.seek(lo);
        if hi < lo {
            return (begin, begin);
        }
        (begin, self.seek(hi))
    }

    /// All pairs with key in `[lo, hi)`. Empty when `hi <= lo`.
    pub fn find_range(&self, lo: &K, hi: &K) -> Range<'_, K, V> {
        let (begin, end) = self.range_bounds(lo, hi);
        Range::new(&self.arena, begin, end)
    }

    /// All pairs with key in `[lo, hi)`, with mutable values
    pub fn find_range_mut(&mut self, lo: &K, hi: &K) -> IterMut<'_, K, V> {
        let (begin, end) = self.range_bounds(lo, hi);
        IterMut::new(&mut self.arena, begin, end)
    }

    fn equal_bounds(&self, key: &K) -> (Cursor, Cursor) {
        let begin = self.seek(key);
        let end = self.end();
        let mut stop = begin;
        while stop != end && self.get(stop).is_some_and(|(k, _)| k == key) {
            stop.advance(&self.arena);
        }
        (begin, stop)
    }

    /// All pairs whose key equals `key`, in load order
    pub fn equal_range(&self, key: &K) -> Range<'_, K, V> {
        let (begin, end) = self.equal_bounds(key);
        Range::new(&self.arena, begin, end)
    }

    /// All pairs whose key equals `key`, with mutable values
    pub fn equal_range_mut(&mut self, key: &K) -> IterMut<'_, K, V> {
        let (begin, end) = self.equal_bounds(key);
        IterMut::new(&mut self.arena, begin, end)
    }

    /// Verify the structural invariants of the tree
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.size != 0 || self.height != 0 || !self.arena.leaves.is_empty() {
                return Err(BTreeError::corruption("empty tree with nodes or a non-zero size"));
            }
            return Ok(());
        };

        if self.arena.height(root) != self.height {
            return Err(BTreeError::corruption("cached height does not match the root"));
        }

        // Every node is reached exactly once, all leaves at the same depth
        let mut seen_leaves = 0usize;
        let mut seen_inners = 0usize;
        let mut stack = vec![(root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                NodeRef::Leaf(id) => {
                    seen_leaves += 1;
                    if depth != self.height {
                        return Err(BTreeError::corruption(format!("leaf {id} at depth {depth}")));
                    }
                    let leaf = self.arena.leaf(id);
                    if leaf.len() == 0 || leaf.len() > Self::NUM_KEYS_PER_LEAF {
                        return Err(BTreeError::corruption(format!("leaf {id} holds {} pairs", leaf.len())));
                    }
                    if leaf.entries().windows(2).any(|w| w[1].0 < w[0].0) {
                        return Err(BTreeError::corruption(format!("leaf {id} is not sorted")));
                    }
                }
                NodeRef::Inner(id) => {
                    seen_inners += 1;
                    let inner = self.arena.inner(id);
                    if inner.len() == 0 || inner.len() > Self::NUM_KEYS_PER_INODE {
                        return Err(BTreeError::corruption(format!("inner node {id} holds {} children", inner.len())));
                    }
                    let children = inner.children();
                    if children.windows(2).any(|w| w[1].0 < w[0].0) {
                        return Err(BTreeError::corruption(format!("inner node {id} separators are not sorted")));
                    }
                    let leaf_children = children.iter().filter(|(_, c)| matches!(c, NodeRef::Leaf(_))).count();
                    if leaf_children != 0 && leaf_children != children.len() {
                        return Err(BTreeError::corruption(format!("inner node {id} mixes leaves and inner nodes")));
                    }
                    for (separator, child) in children {
                        if self.arena.max_pair(*child).map(|(k, _)| k) != Some(separator) {
                            return Err(BTreeError::corruption(format!(
                                "inner node {id} has a separator that is not its child's maximum"
                            )));
                        }
                        stack.push((*child, depth + 1));
                    }
                }
            }
        }
        if seen_leaves != self.arena.leaves.len() || seen_inners != self.arena.inners.len() {
            return Err(BTreeError::corruption("unreachable or shared nodes"));
        }

        // The leaf chain visits every leaf once, in key order
        let mut chained = 0usize;
        let mut pairs = 0usize;
        let mut current = self.arena.first_leaf(root);
        let mut prev_max: Option<&K> = None;
        while let Some(id) = current {
            if id.index() != chained {
                return Err(BTreeError::corruption(format!("leaf chain visits {id} out of order")));
            }
            let leaf = self.arena.leaf(id);
            if let (Some(max), Some((first, _))) = (prev_max, leaf.entries().first()) {
                if first < max {
                    return Err(BTreeError::corruption(format!("leaf {id} starts below its predecessor")));
                }
            }
            chained += 1;
            pairs += leaf.len();
            prev_max = leaf.max_pair().map(|(k, _)| k);
            current = leaf.next();
        }
        if chained != self.arena.leaves.len() {
            return Err(BTreeError::corruption("leaf chain does not reach every leaf"));
        }
        if self.arena.last_leaf(root).map(|id| id.index() + 1) != Some(chained) {
            return Err(BTreeError::corruption("leaf chain does not end at the rightmost leaf"));
        }
        if pairs != self.size {
            return Err(BTreeError::corruption(format!("size is {} but leaves hold {pairs} pairs", self.size)));
        }
        Ok(())
    }
}

impl<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> BTree<K, V, NODE_SIZE, NODE_ALIGN>
where
    K: Ord + Clone + fmt::Debug,
    V: fmt::Debug,
{
    /// Debug search - traces the descent for `key`
    pub fn debug_find(&self, key: &K) -> Vec<String> {
        let mut trace = Vec::new();
        let Some(mut node) = self.root else {
            trace.push("Tree is empty".to_string());
            return trace;
        };

        trace.push(format!("Searching for key: {key:?}"));
        trace.push(format!("Root: {}, Height: {}", node_label(node), self.height));

        loop {
            match node {
                NodeRef::Inner(id) => {
                    let inner = self.arena.inner(id);
                    trace.push(format!("  Inner {id}: {} children", inner.len()));
                    for (i, (separator, child)) in inner.children().iter().enumerate() {
                        trace.push(format!("    Slot {i}: max={separator:?}, child={}", node_label(*child)));
                    }
                    let Some(child) = inner.route(key) else {
                        trace.push("  inner node has no children".to_string());
                        return trace;
                    };
                    trace.push(format!("  -> Descending to {}", node_label(child)));
                    node = child;
                }
                NodeRef::Leaf(id) => {
                    let leaf = self.arena.leaf(id);
                    trace.push(format!("  Leaf {id}: {} pairs", leaf.len()));
                    for (i, (k, _)) in leaf.entries().iter().enumerate() {
                        trace.push(format!("    Slot {i}: key={k:?}"));
                    }
                    let cursor = self.find(key);
                    match self.get(cursor) {
                        Some((_, value)) => trace.push(format!(
                            "  FOUND in {} at slot {}: {value:?}",
                            cursor.leaf().map_or_else(String::new, |l| l.to_string()),
                            cursor.position()
                        )),
                        None => trace.push("  NOT FOUND".to_string()),
                    }
                    return trace;
                }
            }
        }
    }

    /// Export the tree structure for visualization
    pub fn export_tree(&self) -> Option<TreeNode> {
        self.root.map(|root| self.export_node(root))
    }

    fn export_node(&self, node: NodeRef) -> TreeNode {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self.arena.leaf(id);
                TreeNode {
                    node_id: node_label(node),
                    is_leaf: true,
                    keys: leaf.entries().iter().map(|(k, _)| format!("{k:?}")).collect(),
                    values: leaf.entries().iter().map(|(_, v)| format!("{v:?}")).collect(),
                    children: Vec::new(),
                    next_leaf: leaf.next().map(|next| next.to_string()),
                }
            }
            NodeRef::Inner(id) => {
                let inner = self.arena.inner(id);
                TreeNode {
                    node_id: node_label(node),
                    is_leaf: false,
                    keys: inner.children().iter().map(|(k, _)| format!("{k:?}")).collect(),
                    values: Vec::new(),
                    children: inner
                        .children()
                        .iter()
                        .map(|(_, child)| self.export_node(*child))
                        .collect(),
                    next_leaf: None,
                }
            }
        }
    }
}

fn node_label(node: NodeRef) -> String {
    match node {
        NodeRef::Leaf(id) => id.to_string(),
        NodeRef::Inner(id) => id.to_string(),
    }
}

impl<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> fmt::Debug for BTree<K, V, NODE_SIZE, NODE_ALIGN>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> IntoIterator for &'a BTree<K, V, NODE_SIZE, NODE_ALIGN> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    /// Two slots per leaf and per inner node
    type SmallTree = BTree<u64, char, 48, 16>;
    type WideTree = BTree<u64, u64, 256>;

    fn letters() -> Vec<(u64, char)> {
        vec![(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd'), (5, 'e')]
    }

    fn keys_of(range: Range<'_, u64, char>) -> Vec<u64> {
        range.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_btree_empty() -> Result<()> {
        let tree = SmallTree::bulkload(Vec::new())?;
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.find(&1), tree.end());
        assert!(tree.find_range(&0, &10).is_empty());
        assert!(tree.equal_range(&1).is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert!(tree.export_tree().is_none());
        tree.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_btree_five_letters() -> Result<()> {
        assert_eq!(SmallTree::NUM_KEYS_PER_LEAF, 2);
        let tree = SmallTree::bulkload(letters())?;
        assert_eq!(tree.size(), 5);
        assert!(tree.height() >= 1);
        assert_eq!(tree.stats().leaf_count, 3);
        tree.check_invariants()?;

        let found = tree.find(&3);
        assert_eq!(tree.get(found), Some((&3, &'c')));
        assert_eq!(tree.find(&6), tree.end());
        assert_eq!(tree.find(&0), tree.end());

        let pairs: Vec<(u64, char)> = tree.find_range(&2, &5).iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(2, 'b'), (3, 'c'), (4, 'd')]);

        let all: Vec<(u64, char)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(all, letters());
        Ok(())
    }

    #[test]
    fn test_btree_leaf_chain_export() -> Result<()> {
        let tree = SmallTree::bulkload(letters())?;
        let root = tree.export_tree().ok_or_else(|| BTreeError::corruption("no root"))?;
        assert!(!root.is_leaf);

        let mut leaves = Vec::new();
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            if node.is_leaf {
                leaves.push(node.keys.clone());
            }
            stack.extend(node.children.iter().rev());
        }
        assert_eq!(
            leaves,
            vec![vec!["1", "2"], vec!["3", "4"], vec!["5"]]
                .into_iter()
                .map(|keys| keys.into_iter().map(String::from).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn test_btree_cursor_walk() -> Result<()> {
        let tree = SmallTree::bulkload(letters())?;
        let mut cursor = tree.begin();
        let mut keys = Vec::new();
        while cursor != tree.end() {
            let (k, _) = tree.get(cursor).ok_or_else(|| BTreeError::corruption("dangling cursor"))?;
            keys.push(*k);
            tree.advance(&mut cursor);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);

        // advancing the end cursor is a no-op
        tree.advance(&mut cursor);
        assert_eq!(cursor, tree.end());
        assert_eq!(tree.get(cursor), None);
        Ok(())
    }

    #[test]
    fn test_btree_find_range_edges() -> Result<()> {
        let tree = SmallTree::bulkload(letters())?;
        assert!(tree.find_range(&3, &3).is_empty());
        assert!(tree.find_range(&4, &2).is_empty());
        assert_eq!(keys_of(tree.find_range(&0, &100)), vec![1, 2, 3, 4, 5]);
        assert_eq!(keys_of(tree.find_range(&5, &100)), vec![5]);
        assert!(tree.find_range(&6, &100).is_empty());
        assert_eq!(tree.find_range(&6, &100).begin(), tree.end());
        // bounds that fall on leaf edges
        assert_eq!(keys_of(tree.find_range(&3, &5)), vec![3, 4]);
        assert_eq!(keys_of(tree.find_range(&2, &3)), vec![2]);
        assert_eq!(tree.find_range(&2, &5).len(), 3);
        Ok(())
    }

    #[test]
    fn test_btree_duplicates_across_leaves() -> Result<()> {
        let input = vec![(1u64, 'a'), (2, 'b'), (2, 'c'), (2, 'd'), (2, 'e'), (3, 'f')];
        let tree = SmallTree::bulkload(input)?;
        tree.check_invariants()?;

        let values: Vec<char> = tree.equal_range(&2).iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['b', 'c', 'd', 'e']);
        assert_eq!(tree.get_value(&2), Some(&'b'));
        assert!(tree.equal_range(&4).is_empty());
        assert!(tree.equal_range(&0).is_empty());
        assert_eq!(keys_of(tree.find_range(&2, &3)), vec![2, 2, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_btree_value_mutation() -> Result<()> {
        let mut tree = SmallTree::bulkload(letters())?;
        let cursor = tree.find(&4);
        if let Some(value) = tree.value_mut(cursor) {
            *value = 'x';
        }
        assert_eq!(tree.get_value(&4), Some(&'x'));
        assert_eq!(tree.value_mut(tree.end()), None);

        for (_, v) in tree.find_range_mut(&2, &4) {
            *v = v.to_ascii_uppercase();
        }
        for (_, v) in tree.equal_range_mut(&5) {
            *v = '!';
        }
        let values: String = tree.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, "aBCx!");

        for (k, v) in tree.iter_mut() {
            *v = char::from(b'0' + *k as u8);
        }
        let values: String = tree.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, "12345");
        tree.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_btree_rejects_unsorted() {
        let err = SmallTree::bulkload(vec![(2, 'a'), (1, 'b')]).unwrap_err();
        assert_eq!(err, BTreeError::UnsortedInput { index: 1 });
    }

    #[test]
    fn test_btree_unchecked_unsorted_load_is_detected() -> Result<()> {
        let config = LoadConfig::new().verify_sorted(false);
        let tree = SmallTree::bulkload_with_config(vec![(3, 'a'), (1, 'b'), (2, 'c')], config)?;
        assert!(matches!(tree.check_invariants(), Err(BTreeError::Corruption(_))));
        Ok(())
    }

    #[test]
    fn test_btree_many_keys() -> Result<()> {
        let tree = WideTree::bulkload((0..10_000u64).map(|i| (i * 2, i)))?;
        tree.check_invariants()?;
        assert_eq!(tree.size(), 10_000);

        for i in 0..10_000u64 {
            assert_eq!(tree.get_value(&(i * 2)), Some(&i), "Failed for key {}", i * 2);
            assert!(!tree.contains_key(&(i * 2 + 1)));
        }
        assert_eq!(tree.first(), Some((&0, &0)));
        assert_eq!(tree.last(), Some((&19_998, &9_999)));
        assert_eq!(tree.find_range(&100, &200).len(), 50);
        Ok(())
    }

    #[test]
    fn test_btree_random_duplicates() -> Result<()> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut input: Vec<(u64, u64)> = (0..2_000).map(|i| (rng.gen_range(0..100), i)).collect();
        input.sort_by_key(|(k, _)| *k);
        let tree = BTree::<u64, u64, 64, 64>::bulkload(input.clone())?;
        tree.check_invariants()?;

        for key in 0..101u64 {
            let expected: Vec<u64> = input.iter().filter(|(k, _)| *k == key).map(|(_, v)| *v).collect();
            let actual: Vec<u64> = tree.equal_range(&key).iter().map(|(_, v)| *v).collect();
            assert_eq!(actual, expected, "equal_range({key})");
        }
        Ok(())
    }

    #[test]
    fn test_btree_debug_find_trace() -> Result<()> {
        let tree = SmallTree::bulkload(letters())?;
        let trace = tree.debug_find(&3);
        assert!(trace[0].contains("Searching for key: 3"));
        assert!(trace.iter().any(|line| line.contains("FOUND in L1 at slot 0")));

        let trace = tree.debug_find(&9);
        assert_eq!(trace.last().map(String::as_str), Some("  NOT FOUND"));

        let empty = SmallTree::bulkload(Vec::new())?;
        assert_eq!(empty.debug_find(&1), vec!["Tree is empty".to_string()]);
        Ok(())
    }

    #[test]
    fn test_btree_debug_format() -> Result<()> {
        let tree = SmallTree::bulkload(letters())?;
        assert_eq!(format!("{tree:?}"), "{1: 'a', 2: 'b', 3: 'c', 4: 'd', 5: 'e'}");
        Ok(())
    }
}

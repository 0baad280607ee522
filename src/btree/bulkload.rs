//! Bottom-up bulk construction.
//!
//! Sorted input is packed into leaves left to right, each filled to capacity,
//! then each level is packed into parents the same way until a single root
//! remains. Every level has at most `ceil(prev / capacity)` nodes, so the
//! whole build is linear in the input size.

use super::node::{Arena, InnerNode, Leaf, NodeRef};
use crate::error::{BTreeError, Result};
use crate::types::{LeafId, LoadConfig, MIN_FANOUT};

/// The node graph produced by a bulk-load
#[derive(Debug)]
pub(crate) struct Loaded<K, V> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Option<NodeRef>,
    pub(crate) size: usize,
    pub(crate) height: usize,
}

/// Builds a tree from pairs sorted ascending by key
pub(crate) struct BulkLoader {
    leaf_capacity: usize,
    inner_capacity: usize,
    config: LoadConfig,
}

impl BulkLoader {
    pub(crate) fn new(leaf_capacity: usize, inner_capacity: usize, config: LoadConfig) -> Result<Self> {
        for capacity in [leaf_capacity, inner_capacity] {
            if capacity < MIN_FANOUT {
                return Err(BTreeError::InvalidFanout {
                    capacity,
                    min: MIN_FANOUT,
                });
            }
        }
        Ok(Self {
            leaf_capacity,
            inner_capacity,
            config,
        })
    }

    pub(crate) fn load<K, V, I>(&self, input: I) -> Result<Loaded<K, V>>
    where
        K: Ord + Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut arena = Arena::default();
        let (mut level, size) = self.build_leaves(&mut arena, input)?;
        let leaf_count = level.len();

        let mut levels = 0usize;
        while level.len() > 1 {
            level = self.build_parents(&mut arena, level)?;
            levels += 1;
            tracing::trace!(level = levels, nodes = level.len(), "aggregated tree level");
        }

        let root = level.pop().map(|(_, node)| node);
        let height = root.map_or(0, |node| arena.height(node));
        debug_assert_eq!(height, levels);

        tracing::debug!(size, leaves = leaf_count, height, "bulk-load complete");

        Ok(Loaded {
            arena,
            root,
            size,
            height,
        })
    }

    /// Leaf pass: pack the input into linked leaves.
    ///
    /// Returns each leaf with its largest key, in key order, and the number
    /// of pairs consumed.
    fn build_leaves<K, V, I>(&self, arena: &mut Arena<K, V>, input: I) -> Result<(Vec<(K, NodeRef)>, usize)>
    where
        K: Ord + Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let input = input.into_iter();
        let (lower, _) = input.size_hint();
        let mut level = Vec::with_capacity(lower.div_ceil(self.leaf_capacity));
        let mut current = Leaf::new(self.leaf_capacity);
        let mut prev: Option<LeafId> = None;
        let mut size = 0usize;

        for (index, (key, value)) in input.enumerate() {
            if self.config.verify_sorted {
                let last_key = match current.max_pair() {
                    Some((k, _)) => Some(k),
                    None => level.last().map(|(k, _)| k),
                };
                if last_key.is_some_and(|last| key < *last) {
                    tracing::debug!(index, "rejecting unsorted bulk-load input");
                    return Err(BTreeError::UnsortedInput { index });
                }
            }

            if current.is_full() {
                let full = std::mem::replace(&mut current, Leaf::new(self.leaf_capacity));
                Self::seal_leaf(arena, full, &mut prev, &mut level)?;
            }
            current.append(key, value)?;
            size += 1;
        }

        if current.len() > 0 {
            Self::seal_leaf(arena, current, &mut prev, &mut level)?;
        }

        Ok((level, size))
    }

    /// Store a filled leaf, link its predecessor to it, and record its
    /// separator.
    fn seal_leaf<K: Clone, V>(
        arena: &mut Arena<K, V>,
        leaf: Leaf<K, V>,
        prev: &mut Option<LeafId>,
        level: &mut Vec<(K, NodeRef)>,
    ) -> Result<()> {
        let Some(separator) = leaf.max_pair().map(|(k, _)| k.clone()) else {
            return Ok(());
        };
        let id = arena.push_leaf(leaf)?;
        if let Some(prev_id) = prev.replace(id) {
            arena.leaf_mut(prev_id).set_next(Some(id));
        }
        level.push((separator, NodeRef::Leaf(id)));
        Ok(())
    }

    /// Level aggregation: pack one level of (separator, node) pairs into
    /// parents, each recording the largest separator among its children.
    fn build_parents<K: Clone, V>(
        &self,
        arena: &mut Arena<K, V>,
        children: Vec<(K, NodeRef)>,
    ) -> Result<Vec<(K, NodeRef)>> {
        let mut parents = Vec::with_capacity(children.len().div_ceil(self.inner_capacity));
        let mut current = InnerNode::new(self.inner_capacity);

        for (separator, child) in children {
            if current.is_full() {
                let full = std::mem::replace(&mut current, InnerNode::new(self.inner_capacity));
                Self::seal_inner(arena, full, &mut parents)?;
            }
            current.append(separator, child)?;
        }
        Self::seal_inner(arena, current, &mut parents)?;

        Ok(parents)
    }

    fn seal_inner<K: Clone, V>(
        arena: &mut Arena<K, V>,
        node: InnerNode<K>,
        parents: &mut Vec<(K, NodeRef)>,
    ) -> Result<()> {
        let Some(separator) = node.children().last().map(|(k, _)| k.clone()) else {
            return Ok(());
        };
        let id = arena.push_inner(node)?;
        parents.push((separator, NodeRef::Inner(id)));
        Ok(())
    }
}

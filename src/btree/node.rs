//! Leaf and inner nodes, and the arena that owns them.
//!
//! Nodes live in two flat arenas owned by the tree and refer to each other by
//! index. Parent-to-child references express ownership of the subtree; the
//! leaf-to-leaf `next` link is only a traversal hint and owns nothing, so
//! dropping the arena releases every node exactly once.

use crate::error::{BTreeError, Result};
use crate::types::{InnerId, LeafId};

/// A reference to a child node. All children of one inner node are of the
/// same kind, one level below their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Inner(InnerId),
    Leaf(LeafId),
}

/// A leaf: up to `capacity` key-value pairs in ascending key order, plus the
/// link to the next leaf.
#[derive(Debug)]
pub(crate) struct Leaf<K, V> {
    entries: Vec<(K, V)>,
    capacity: usize,
    next: Option<LeafId>,
}

impl<K, V> Leaf<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next: None,
        }
    }

    /// Append a pair at the next free slot. Callers append in key order.
    pub(crate) fn append(&mut self, key: K, value: V) -> Result<()> {
        if self.is_full() {
            return Err(BTreeError::NodeFull {
                capacity: self.capacity,
            });
        }
        self.entries.push((key, value));
        Ok(())
    }

    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The pair with the largest key
    pub(crate) fn max_pair(&self) -> Option<&(K, V)> {
        self.entries.last()
    }

    pub(crate) fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [(K, V)] {
        &mut self.entries
    }

    pub(crate) fn next(&self) -> Option<LeafId> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<LeafId>) {
        self.next = next;
    }
}

impl<K: Ord, V> Leaf<K, V> {
    /// Index of the first slot whose key is not less than `key`
    pub(crate) fn lower_bound(&self, key: &K) -> usize {
        self.entries.partition_point(|(k, _)| k < key)
    }
}

/// An inner node: up to `capacity` (separator, child) pairs, where each
/// separator is the largest key in its child's subtree.
#[derive(Debug)]
pub(crate) struct InnerNode<K> {
    children: Vec<(K, NodeRef)>,
    capacity: usize,
}

impl<K> InnerNode<K> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            children: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a child with its separator. Callers append in key order.
    pub(crate) fn append(&mut self, separator: K, child: NodeRef) -> Result<()> {
        if self.is_full() {
            return Err(BTreeError::NodeFull {
                capacity: self.capacity,
            });
        }
        self.children.push((separator, child));
        Ok(())
    }

    pub(crate) fn is_full(&self) -> bool {
        self.children.len() >= self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.children.len()
    }

    pub(crate) fn children(&self) -> &[(K, NodeRef)] {
        &self.children
    }

    pub(crate) fn first_child(&self) -> Option<NodeRef> {
        self.children.first().map(|(_, child)| *child)
    }

    pub(crate) fn last_child(&self) -> Option<NodeRef> {
        self.children.last().map(|(_, child)| *child)
    }
}

impl<K: Ord> InnerNode<K> {
    /// Child to descend into for `key`: the leftmost child whose separator is
    /// not less than `key`. Keys above every separator go to the last child,
    /// so descent always ends in a real leaf.
    pub(crate) fn route(&self, key: &K) -> Option<NodeRef> {
        let idx = self.children.partition_point(|(sep, _)| sep < key);
        self.children
            .get(idx)
            .map(|(_, child)| *child)
            .or_else(|| self.last_child())
    }
}

/// Owner of every node in a tree.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    pub(crate) leaves: Vec<Leaf<K, V>>,
    pub(crate) inners: Vec<InnerNode<K>>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            inners: Vec::new(),
        }
    }
}

impl<K, V> Arena<K, V> {
    pub(crate) fn push_leaf(&mut self, leaf: Leaf<K, V>) -> Result<LeafId> {
        let id = LeafId::from_index(self.leaves.len())?;
        self.leaves.push(leaf);
        Ok(id)
    }

    pub(crate) fn push_inner(&mut self, inner: InnerNode<K>) -> Result<InnerId> {
        let id = InnerId::from_index(self.inners.len())?;
        self.inners.push(inner);
        Ok(id)
    }

    pub(crate) fn leaf(&self, id: LeafId) -> &Leaf<K, V> {
        &self.leaves[id.index()]
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> &mut Leaf<K, V> {
        &mut self.leaves[id.index()]
    }

    pub(crate) fn inner(&self, id: InnerId) -> &InnerNode<K> {
        &self.inners[id.index()]
    }

    /// Leftmost leaf below `node`
    pub(crate) fn first_leaf(&self, mut node: NodeRef) -> Option<LeafId> {
        loop {
            match node {
                NodeRef::Leaf(id) => return Some(id),
                NodeRef::Inner(id) => node = self.inner(id).first_child()?,
            }
        }
    }

    /// Rightmost leaf below `node`
    pub(crate) fn last_leaf(&self, mut node: NodeRef) -> Option<LeafId> {
        loop {
            match node {
                NodeRef::Leaf(id) => return Some(id),
                NodeRef::Inner(id) => node = self.inner(id).last_child()?,
            }
        }
    }

    /// The pair with the largest key below `node`; this is the separator the
    /// node contributes to its parent.
    pub(crate) fn max_pair(&self, node: NodeRef) -> Option<&(K, V)> {
        self.last_leaf(node)
            .and_then(|leaf| self.leaf(leaf).max_pair())
    }

    /// Number of inner-node levels between `node` and the leaves
    pub(crate) fn height(&self, mut node: NodeRef) -> usize {
        let mut height = 0;
        while let NodeRef::Inner(id) = node {
            match self.inner(id).last_child() {
                Some(child) => {
                    height += 1;
                    node = child;
                }
                None => break,
            }
        }
        height
    }
}

impl<K: Ord, V> Arena<K, V> {
    /// Descend from `node` to the leaf that may hold `key`
    pub(crate) fn find_leaf(&self, mut node: NodeRef, key: &K) -> Option<LeafId> {
        loop {
            match node {
                NodeRef::Leaf(id) => return Some(id),
                NodeRef::Inner(id) => node = self.inner(id).route(key)?,
            }
        }
    }
}

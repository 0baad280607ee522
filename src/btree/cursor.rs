//! Cursors and ranges over the leaf chain.
//!
//! A [`Cursor`] is a plain position: the current leaf, the slot within it,
//! and that leaf's slot count. Stepping past the last slot of a leaf moves to
//! slot 0 of the next leaf; stepping past the last slot of the last leaf
//! leaves the cursor at that leaf's end, which is the tree's end position.

use super::node::{Arena, Leaf};
use crate::types::LeafId;
use std::iter::FusedIterator;

/// A position in the tree.
///
/// Two cursors are equal only if they agree on the leaf, the slot and the
/// cached leaf end. Always compare against [`BTree::end`](crate::BTree::end)
/// rather than building an end position by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    leaf: Option<LeafId>,
    pos: usize,
    end: usize,
}

impl Cursor {
    pub(crate) fn at_slot<K, V>(arena: &Arena<K, V>, leaf: LeafId, pos: usize) -> Self {
        Self {
            leaf: Some(leaf),
            pos,
            end: arena.leaf(leaf).len(),
        }
    }

    /// The leaf this cursor points into, `None` for an empty tree
    pub fn leaf(&self) -> Option<LeafId> {
        self.leaf
    }

    /// Slot index within the current leaf
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether the cursor is past the last slot of its leaf
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Move a cursor parked past the end of a non-last leaf to the start of
    /// the next leaf, so that every position has a single representation.
    pub(crate) fn normalize<K, V>(self, arena: &Arena<K, V>) -> Self {
        if !self.is_exhausted() {
            return self;
        }
        match self.leaf.and_then(|id| arena.leaves.get(id.index())).and_then(Leaf::next) {
            Some(next) => Self::at_slot(arena, next, 0),
            None => self,
        }
    }

    /// The pair under the cursor
    pub(crate) fn get<'a, K, V>(&self, arena: &'a Arena<K, V>) -> Option<(&'a K, &'a V)> {
        let leaf = arena.leaves.get(self.leaf?.index())?;
        leaf.entries().get(self.pos).map(|(k, v)| (k, v))
    }

    /// Step one slot forward, following the leaf chain
    pub(crate) fn advance<K, V>(&mut self, arena: &Arena<K, V>) {
        let Some(leaf) = self.leaf.and_then(|id| arena.leaves.get(id.index())) else {
            return;
        };
        if self.is_exhausted() {
            return;
        }
        self.pos += 1;
        if self.pos == self.end {
            if let Some(next) = leaf.next() {
                *self = Self::at_slot(arena, next, 0);
            }
        }
    }
}

/// A half-open `[begin, end)` span of the tree
pub struct Range<'a, K, V> {
    arena: &'a Arena<K, V>,
    begin: Cursor,
    end: Cursor,
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Range<'_, K, V> {}

impl<'a, K, V> Range<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, begin: Cursor, end: Cursor) -> Self {
        Self { arena, begin, end }
    }

    /// First position in the range
    pub fn begin(&self) -> Cursor {
        self.begin
    }

    /// Position one past the range
    pub fn end(&self) -> Cursor {
        self.end
    }

    /// Whether the range holds no pairs
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Number of pairs in the range. Walks the range.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over the pairs in the range
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter {
            arena: self.arena,
            cursor: self.begin,
            end: self.end,
        }
    }
}

impl<'a, K, V> IntoIterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over `(&K, &V)` pairs in key order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    arena: &'a Arena<K, V>,
    cursor: Cursor,
    end: Cursor,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            cursor: self.cursor,
            end: self.end,
        }
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Current position of the iterator
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.end {
            return None;
        }
        let item = self.cursor.get(self.arena)?;
        self.cursor.advance(self.arena);
        Some(item)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over `(&K, &mut V)` pairs in key order.
///
/// Leaves are stored in key order, so a range maps onto a contiguous run of
/// the leaf arena: a partial first leaf, whole middle leaves and a partial
/// last leaf.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    current: std::slice::IterMut<'a, (K, V)>,
    middle: std::slice::IterMut<'a, Leaf<K, V>>,
    tail: Option<&'a mut [(K, V)]>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn empty() -> Self {
        Self {
            current: Default::default(),
            middle: Default::default(),
            tail: None,
        }
    }

    /// Iterate over `[begin, end)`. Both cursors must come from the same tree
    /// and `begin` must not be after `end`.
    pub(crate) fn new(arena: &'a mut Arena<K, V>, begin: Cursor, end: Cursor) -> Self {
        let (Some(first), Some(last)) = (begin.leaf, end.leaf) else {
            return Self::empty();
        };
        if begin == end || first > last {
            return Self::empty();
        }

        let Some(span) = arena.leaves.get_mut(first.index()..=last.index()) else {
            return Self::empty();
        };
        let Some((head, rest)) = span.split_first_mut() else {
            return Self::empty();
        };

        match rest.split_last_mut() {
            None => {
                let entries = head.entries_mut();
                let stop = end.pos.min(entries.len());
                let start = begin.pos.min(stop);
                Self {
                    current: entries[start..stop].iter_mut(),
                    middle: Default::default(),
                    tail: None,
                }
            }
            Some((tail, middle)) => {
                let entries = head.entries_mut();
                let start = begin.pos.min(entries.len());
                let tail = tail.entries_mut();
                let stop = end.pos.min(tail.len());
                Self {
                    current: entries[start..].iter_mut(),
                    middle: middle.iter_mut(),
                    tail: Some(&mut tail[..stop]),
                }
            }
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.current.next() {
                return Some((&*k, v));
            }
            if let Some(leaf) = self.middle.next() {
                self.current = leaf.entries_mut().iter_mut();
            } else if let Some(tail) = self.tail.take() {
                self.current = tail.iter_mut();
            } else {
                return None;
            }
        }
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

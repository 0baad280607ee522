//! B+-tree implementation.
//!
//! This module provides an in-memory, bulk-loaded B+-tree that supports:
//! - Point lookups (find)
//! - Half-open range queries (find_range)
//! - Equality queries (equal_range)
//! - Ordered iteration over the leaf chain

mod bulkload;
mod cursor;
mod layout;
mod node;
mod tree;

pub use cursor::{Cursor, Iter, IterMut, Range};
pub use layout::NodeLayout;
pub use node::NodeRef;
pub use tree::BTree;

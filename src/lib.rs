//! # Bulk-loaded B+-tree index
//!
//! An in-memory B+-tree mapping ordered keys to values, built once from
//! sorted input and read-only afterwards.
//!
//! ## Architecture
//!
//! - **Types** (`types`): node ids, layout arithmetic, load options
//! - **B+-tree** (`btree`): node layout, leaf and inner nodes, the bulk
//!   loader, cursors and ranges, and the `BTree` query surface
//!
//! Node fanout is derived from a byte budget given as a const parameter, so
//! `BTree<u64, u64, 256>` packs as many pairs as fit in 256-byte nodes. A
//! budget too small for two slots per node fails to compile.
//!
//! ## Usage
//!
//! ```rust
//! use bulk_btree::BTree;
//!
//! let tree = BTree::<u64, &str, 128, 64>::bulkload(vec![(1, "a"), (2, "b"), (3, "c")])?;
//!
//! // Point lookup
//! let cursor = tree.find(&2);
//! assert_eq!(tree.get(cursor), Some((&2, &"b")));
//! assert_eq!(tree.find(&9), tree.end());
//!
//! // Range scan over [lo, hi)
//! for (key, value) in tree.find_range(&1, &3) {
//!     println!("{key} -> {value}");
//! }
//! # Ok::<(), bulk_btree::BTreeError>(())
//! ```

pub mod btree;
pub mod error;
pub mod types;

pub use error::{BTreeError, Result};
pub use types::{InnerId, LayoutInfo, LeafId, LoadConfig};

// Re-export main public API
pub use btree::{BTree, Cursor, Iter, IterMut, NodeLayout, Range};

use serde::{Deserialize, Serialize};

/// Node type for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Node id, `L<n>` for leaves and `I<n>` for inner nodes
    pub node_id: String,
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in a leaf, or the separator (subtree maximum) of each child
    pub keys: Vec<String>,
    /// Values (only for leaf nodes)
    pub values: Vec<String>,
    /// Child nodes (only for inner nodes)
    pub children: Vec<TreeNode>,
    /// Next leaf in key order (only for leaf nodes)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_leaf: Option<String>,
}

/// Tree statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Number of key-value pairs
    pub size: usize,
    /// Number of inner-node levels
    pub height: usize,
    /// Number of leaves
    pub leaf_count: usize,
    /// Number of inner nodes
    pub inner_count: usize,
    /// Node layout of the tree type
    pub layout: LayoutInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() -> Result<()> {
        let pairs: Vec<(String, u32)> = ["apple", "banana", "cherry", "date"]
            .iter()
            .enumerate()
            .map(|(i, s)| (s.to_string(), i as u32))
            .collect();
        let tree = BTree::<String, u32, 128, 64>::bulkload(pairs)?;

        assert_eq!(tree.get_value(&"cherry".to_string()), Some(&2));
        assert_eq!(tree.get_value(&"nonexistent".to_string()), None);

        let range: Vec<&str> = tree
            .find_range(&"banana".to_string(), &"date".to_string())
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(range, vec!["banana", "cherry"]);
        Ok(())
    }

    #[test]
    fn test_stats_and_export_serialize() -> Result<()> {
        let tree = BTree::<u64, u64, 48, 16>::bulkload((1..=5).map(|i| (i, i * 10)))?;

        let stats = tree.stats();
        assert_eq!(stats.size, 5);
        assert_eq!(stats.leaf_count, 3);
        assert_eq!(stats.layout.leaf_capacity, 2);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["leafCount"], 3);
        assert_eq!(json["layout"]["innerCapacity"], 2);

        let root = tree.export_tree().unwrap();
        let json = serde_json::to_string(&root).unwrap();
        let parsed: TreeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, root);
        assert_eq!(parsed.keys, vec!["4".to_string(), "5".to_string()]);
        Ok(())
    }
}

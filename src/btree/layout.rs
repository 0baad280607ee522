//! Compile-time node layout.
//!
//! Fanout is derived from the byte budget of a node. The checks in
//! [`NodeLayout::ASSERT_VALID`] run during monomorphization, so a tree type
//! whose nodes would not fit its budget fails to build.

use super::node::NodeRef;
use crate::types::{
    node_bytes, node_capacity, LayoutInfo, LeafId, MIN_FANOUT, SIZE_COUNTER_BYTES,
};
use std::marker::PhantomData;
use std::mem::{align_of, size_of};

/// Node layout for keys `K`, values `V`, `NODE_SIZE`-byte nodes aligned to
/// `NODE_ALIGN` bytes.
pub struct NodeLayout<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize>(PhantomData<(K, V)>);

impl<K, V, const NODE_SIZE: usize, const NODE_ALIGN: usize> NodeLayout<K, V, NODE_SIZE, NODE_ALIGN> {
    /// Leaf header: slot counter plus the next-leaf link
    pub const LEAF_HEADER_BYTES: usize = SIZE_COUNTER_BYTES + size_of::<Option<LeafId>>();
    /// Inner-node header: slot counter
    pub const INODE_HEADER_BYTES: usize = SIZE_COUNTER_BYTES;

    const LEAF_SLOT_BYTES: usize = size_of::<(K, V)>();
    const LEAF_SLOT_ALIGN: usize = align_of::<(K, V)>();
    const INODE_SLOT_BYTES: usize = size_of::<(K, NodeRef)>();
    const INODE_SLOT_ALIGN: usize = align_of::<(K, NodeRef)>();

    /// Number of key-value pairs per leaf
    pub const NUM_KEYS_PER_LEAF: usize = node_capacity(
        NODE_SIZE,
        NODE_ALIGN,
        Self::LEAF_HEADER_BYTES,
        Self::LEAF_SLOT_BYTES,
        Self::LEAF_SLOT_ALIGN,
    );

    /// Number of separator-child pairs per inner node
    pub const NUM_KEYS_PER_INODE: usize = node_capacity(
        NODE_SIZE,
        NODE_ALIGN,
        Self::INODE_HEADER_BYTES,
        Self::INODE_SLOT_BYTES,
        Self::INODE_SLOT_ALIGN,
    );

    /// Bytes taken by a full leaf record
    pub const LEAF_BYTES: usize = node_bytes(
        Self::NUM_KEYS_PER_LEAF,
        NODE_ALIGN,
        Self::LEAF_HEADER_BYTES,
        Self::LEAF_SLOT_BYTES,
        Self::LEAF_SLOT_ALIGN,
    );

    /// Bytes taken by a full inner-node record
    pub const INODE_BYTES: usize = node_bytes(
        Self::NUM_KEYS_PER_INODE,
        NODE_ALIGN,
        Self::INODE_HEADER_BYTES,
        Self::INODE_SLOT_BYTES,
        Self::INODE_SLOT_ALIGN,
    );

    /// Evaluating this constant fails the build for an unusable configuration.
    pub const ASSERT_VALID: () = {
        assert!(NODE_ALIGN.is_power_of_two(), "node alignment must be a power of two");
        assert!(
            NODE_ALIGN >= Self::LEAF_SLOT_ALIGN && NODE_ALIGN >= Self::INODE_SLOT_ALIGN,
            "node alignment is weaker than the alignment of a slot"
        );
        assert!(Self::LEAF_SLOT_BYTES > 0, "zero-sized key-value slots are not supported");
        assert!(Self::NUM_KEYS_PER_LEAF >= MIN_FANOUT, "node size leaves room for fewer than 2 leaf slots");
        assert!(Self::NUM_KEYS_PER_INODE >= MIN_FANOUT, "node size leaves room for fewer than 2 inner slots");
        assert!(Self::LEAF_BYTES <= NODE_SIZE, "leaf exceeds its size limit");
        assert!(Self::INODE_BYTES <= NODE_SIZE, "inner node exceeds its size limit");
    };

    /// Describe this layout
    pub const fn info() -> LayoutInfo {
        LayoutInfo {
            node_size: NODE_SIZE,
            node_alignment: NODE_ALIGN,
            leaf_capacity: Self::NUM_KEYS_PER_LEAF,
            inner_capacity: Self::NUM_KEYS_PER_INODE,
            leaf_bytes: Self::LEAF_BYTES,
            inner_bytes: Self::INODE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_slot_layout() {
        type Layout = NodeLayout<u64, u64, 48, 16>;
        let () = Layout::ASSERT_VALID;
        assert_eq!(Layout::NUM_KEYS_PER_LEAF, 2);
        assert_eq!(Layout::NUM_KEYS_PER_INODE, 2);
        assert!(Layout::LEAF_BYTES <= 48);
        assert!(Layout::INODE_BYTES <= 48);
    }

    #[test]
    fn test_page_sized_layout() {
        type Layout = NodeLayout<u64, u64, 4096, 4096>;
        let () = Layout::ASSERT_VALID;
        assert!(Layout::NUM_KEYS_PER_LEAF >= 250);
        assert!(Layout::NUM_KEYS_PER_INODE >= Layout::NUM_KEYS_PER_LEAF);

        let info = Layout::info();
        assert_eq!(info.node_size, 4096);
        assert_eq!(info.node_alignment, 4096);
        assert_eq!(info.leaf_capacity, Layout::NUM_KEYS_PER_LEAF);
        assert_eq!(info.inner_bytes, Layout::INODE_BYTES);
    }

    #[test]
    fn test_wide_values_shrink_leaves_only() {
        type Narrow = NodeLayout<u32, u8, 256, 256>;
        type Wide = NodeLayout<u32, [u8; 60], 256, 256>;
        let () = Narrow::ASSERT_VALID;
        let () = Wide::ASSERT_VALID;
        assert!(Wide::NUM_KEYS_PER_LEAF < Narrow::NUM_KEYS_PER_LEAF);
        assert_eq!(Wide::NUM_KEYS_PER_INODE, Narrow::NUM_KEYS_PER_INODE);
    }
}

//! Node identifier types.

use crate::error::{BTreeError, Result};
use std::fmt;

/// Index of a leaf in the tree's leaf arena.
///
/// Leaves are allocated in key order during bulk-load, so a larger id always
/// holds larger (or equal) keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId(u32);

/// Index of an inner node in the tree's inner-node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InnerId(u32);

/// Largest number of nodes of one kind a tree can address
pub const MAX_NODES: usize = u32::MAX as usize;

fn checked_id(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| BTreeError::TooManyNodes { max: MAX_NODES })
}

impl LeafId {
    /// Create a leaf id for the given arena index
    pub(crate) fn from_index(index: usize) -> Result<Self> {
        checked_id(index).map(Self)
    }

    /// Get the arena index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl InnerId {
    /// Create an inner-node id for the given arena index
    pub(crate) fn from_index(index: usize) -> Result<Self> {
        checked_id(index).map(Self)
    }

    /// Get the arena index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for InnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_basics() -> Result<()> {
        let leaf = LeafId::from_index(42)?;
        assert_eq!(leaf.index(), 42);
        assert_eq!(leaf.value(), 42);

        let inner = InnerId::from_index(3)?;
        assert_eq!(inner.index(), 3);
        Ok(())
    }

    #[test]
    fn test_node_id_display() -> Result<()> {
        assert_eq!(format!("{}", LeafId::from_index(7)?), "L7");
        assert_eq!(format!("{}", InnerId::from_index(0)?), "I0");
        Ok(())
    }

    #[test]
    fn test_node_id_overflow() {
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            LeafId::from_index(MAX_NODES + 1),
            Err(BTreeError::TooManyNodes { max: MAX_NODES })
        );
    }
}

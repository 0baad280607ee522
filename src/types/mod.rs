//! Common types used throughout the index.

mod node_id;

pub use node_id::{InnerId, LeafId, MAX_NODES};

use serde::{Deserialize, Serialize};

/// Minimum number of slots per node. With a single slot per inner node,
/// level aggregation would never shrink a level.
pub const MIN_FANOUT: usize = 2;

/// Size of the per-node slot counter in bytes
pub const SIZE_COUNTER_BYTES: usize = std::mem::size_of::<u32>();

/// Round `n` up to the next multiple of `align` (`align` must be non-zero)
pub const fn round_up(n: usize, align: usize) -> usize {
    n.div_ceil(align) * align
}

/// Round `n` down to a multiple of `align` (`align` must be non-zero)
pub const fn round_down(n: usize, align: usize) -> usize {
    n / align * align
}

/// Number of slots that fit in a node of `node_size` bytes.
///
/// The node record is laid out as a header of `header_size` bytes, padded up
/// to `slot_align`, followed by the slot array; the whole record is rounded up
/// to `node_align`. Returns 0 for degenerate inputs (zero-sized slots, zero
/// alignment, or a header that does not fit).
pub const fn node_capacity(
    node_size: usize,
    node_align: usize,
    header_size: usize,
    slot_size: usize,
    slot_align: usize,
) -> usize {
    if slot_size == 0 || node_align == 0 || slot_align == 0 {
        return 0;
    }
    let budget = round_down(node_size, node_align);
    let slots_start = round_up(header_size, slot_align);
    if budget < slots_start {
        return 0;
    }
    (budget - slots_start) / slot_size
}

/// Size in bytes of a node record holding `capacity` slots, laid out as
/// described in [`node_capacity`].
pub const fn node_bytes(
    capacity: usize,
    node_align: usize,
    header_size: usize,
    slot_size: usize,
    slot_align: usize,
) -> usize {
    if node_align == 0 || slot_align == 0 {
        return usize::MAX;
    }
    round_up(round_up(header_size, slot_align) + capacity * slot_size, node_align)
}

/// Options for bulk-loading a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadConfig {
    /// Reject input whose keys are not ascending (default: true)
    pub verify_sorted: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            verify_sorted: true,
        }
    }
}

impl LoadConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the sortedness check.
    ///
    /// Unsorted input loaded without the check yields a tree whose queries
    /// return unspecified (but memory-safe) results.
    pub fn verify_sorted(mut self, enabled: bool) -> Self {
        self.verify_sorted = enabled;
        self
    }
}

/// Node layout derived from a key type, value type and byte budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    /// Byte budget per node
    pub node_size: usize,
    /// Required node alignment
    pub node_alignment: usize,
    /// Key-value slots per leaf
    pub leaf_capacity: usize,
    /// Key-child slots per inner node
    pub inner_capacity: usize,
    /// Bytes used by a full leaf record
    pub leaf_bytes: usize,
    /// Bytes used by a full inner-node record
    pub inner_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_up(12, 8), 16);
        assert_eq!(round_up(16, 8), 16);
        assert_eq!(round_up(0, 8), 0);
        assert_eq!(round_down(63, 16), 48);
        assert_eq!(round_down(64, 64), 64);
    }

    #[test]
    fn test_node_capacity() {
        // 12-byte header padded to 16, then 16-byte slots
        assert_eq!(node_capacity(256, 256, 12, 16, 8), 15);
        assert_eq!(node_capacity(48, 16, 12, 16, 8), 2);
        // budget is cut to a multiple of the alignment first
        assert_eq!(node_capacity(100, 64, 4, 8, 4), 7);
        // header alone does not fit
        assert_eq!(node_capacity(8, 8, 12, 16, 8), 0);
        // zero-sized slots are degenerate
        assert_eq!(node_capacity(64, 64, 4, 0, 1), 0);
    }

    #[test]
    fn test_node_bytes_within_budget() {
        for node_size in [32usize, 48, 64, 128, 256, 4096] {
            for header in [4usize, 12] {
                let align = 16;
                let cap = node_capacity(node_size, align, header, 24, 8);
                assert!(node_bytes(cap, align, header, 24, 8) <= node_size);
                assert!(node_bytes(cap + 1, align, header, 24, 8) > round_down(node_size, align));
            }
        }
    }

    #[test]
    fn test_load_config_builder() {
        let config = LoadConfig::new();
        assert!(config.verify_sorted);

        let config = LoadConfig::new().verify_sorted(false);
        assert!(!config.verify_sorted);
    }

    #[test]
    fn test_load_config_serde() {
        let json = serde_json::to_string(&LoadConfig::default()).unwrap();
        assert_eq!(json, r#"{"verifySorted":true}"#);
        let parsed: LoadConfig = serde_json::from_str(r#"{"verifySorted":false}"#).unwrap();
        assert!(!parsed.verify_sorted);
    }
}

//! Error types for the B+-tree index.

use thiserror::Error;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, BTreeError>;

/// Errors that can occur while building or checking a tree.
///
/// Looking up a key that is not present is not an error; queries report
/// absence through the end cursor or an empty range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BTreeError {
    /// Bulk-load input was not sorted ascending by key
    #[error("Bulk-load input is not sorted: key at index {index} is smaller than its predecessor")]
    UnsortedInput { index: usize },

    /// A node was asked to take one more slot than it has room for
    #[error("Node is full (capacity: {capacity})")]
    NodeFull { capacity: usize },

    /// A node capacity below the minimum fanout of 2
    #[error("Invalid fanout: {capacity} slots per node (min: {min})")]
    InvalidFanout { capacity: usize, min: usize },

    /// The node arena ran out of addressable ids
    #[error("Too many nodes: the arena is limited to {max} nodes per kind")]
    TooManyNodes { max: usize },

    /// A structural invariant does not hold
    #[error("Corruption detected: {0}")]
    Corruption(String),
}

impl BTreeError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BTreeError::UnsortedInput { index: 7 };
        assert!(err.to_string().contains("index 7"));

        let err = BTreeError::NodeFull { capacity: 4 };
        assert_eq!(err.to_string(), "Node is full (capacity: 4)");

        let err = BTreeError::corruption("leaf chain broken");
        assert_eq!(err.to_string(), "Corruption detected: leaf chain broken");
    }
}

//! Error types for ordix.

use crate::node::NodeId;
use thiserror::Error;

/// Result type alias using OrdixError.
pub type Result<T> = std::result::Result<T, OrdixError>;

/// Errors that can occur in ordix operations.
///
/// Lookups never fail: a missing key is reported as `None`, not as an error.
#[derive(Debug, Error)]
pub enum OrdixError {
    // Insert errors
    #[error("Duplicate key: {index}")]
    DuplicateKey { index: u64 },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {node} with key {index} is already linked")]
    NodeAlreadyLinked { node: NodeId, index: u64 },

    #[error("Node arena full: {capacity} nodes")]
    ArenaFull { capacity: usize },

    // Structural validation errors
    #[error("Height mismatch at key {index}: stored {stored}, computed {computed}")]
    HeightMismatch {
        index: u64,
        stored: i32,
        computed: i32,
    },

    #[error("Unbalanced node at key {index}: balance factor {balance}")]
    Unbalanced { index: u64, balance: i32 },

    #[error("Order violation: key {index} follows key {previous}")]
    OrderViolation { index: u64, previous: u64 },

    #[error("Node {node} reachable more than once")]
    CycleDetected { node: NodeId },

    // Fixture errors
    #[error("Malformed fixture: {0}")]
    MalformedFixture(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },
}

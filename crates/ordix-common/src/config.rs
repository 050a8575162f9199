//! Configuration structures for ordix indexes.

use crate::error::{OrdixError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest node count an index may reserve up front (16M nodes).
///
/// Larger indexes are still possible; storage then grows on demand.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Configuration for an AVL index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of node slots reserved up front.
    pub initial_capacity: usize,
    /// Insertion algorithm.
    pub strategy: InsertStrategy,
    /// Behaviour when a key is already present.
    pub duplicates: DuplicatePolicy,
    /// Audit the whole tree after every insert and panic on a violation.
    pub validate_on_insert: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            strategy: InsertStrategy::Recursive,
            duplicates: DuplicatePolicy::Allow,
            validate_on_insert: false,
        }
    }
}

impl IndexConfig {
    /// Checks that the configuration can be used to build an index.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(OrdixError::InvalidParameter {
                name: "initial_capacity".to_string(),
                value: self.initial_capacity.to_string(),
            });
        }
        Ok(())
    }
}

/// Insertion algorithm used by an index.
///
/// Both strategies produce identical trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertStrategy {
    /// Recursive descent, rebalancing on unwind.
    #[default]
    Recursive,
    /// Iterative descent into a fixed path buffer, then a bottom-up pass.
    Iterative,
}

impl FromStr for InsertStrategy {
    type Err = OrdixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" => Ok(InsertStrategy::Recursive),
            "iterative" => Ok(InsertStrategy::Iterative),
            other => Err(OrdixError::ConfigError(format!(
                "unknown insert strategy: {}",
                other
            ))),
        }
    }
}

/// Policy for inserting a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Equal keys route right. Lookups return the shallowest match.
    #[default]
    Allow,
    /// Fail with `DuplicateKey` and leave the tree untouched.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = OrdixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(DuplicatePolicy::Allow),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(OrdixError::ConfigError(format!(
                "unknown duplicate policy: {}",
                other
            ))),
        }
    }
}

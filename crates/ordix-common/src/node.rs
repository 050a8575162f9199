//! Node handles for arena-backed index storage.

use serde::{Deserialize, Serialize};

/// Maximum number of nodes addressable by a [`NodeId`].
///
/// `u32::MAX` itself is reserved as the invalid handle.
pub const MAX_NODES: usize = u32::MAX as usize;

/// Stable handle to a node slot in a node arena.
///
/// Handles are plain slot numbers. A handle stays valid for as long as the
/// arena that issued it is alive, because nodes are never moved or freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node handle.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Creates a handle for the given slot number.
    #[inline]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Returns the slot number as a `usize` suitable for indexing.
    #[inline(always)]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw `u32` representation.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true if this is a valid handle.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

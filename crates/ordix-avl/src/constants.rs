//! AVL index constants.

/// Capacity of the fixed path buffer used by iterative insertion.
///
/// An AVL tree over at most `u32::MAX` nodes is never taller than
/// 1.44 * log2(n + 2), i.e. 47 levels, so 64 slots suffice for any balanced
/// tree. Deeper paths spill onto the heap.
pub const MAX_PATH_DEPTH: usize = 64;

/// Height of an absent subtree.
pub const EMPTY_HEIGHT: i32 = 0;

/// Height of a freshly linked leaf.
pub const LEAF_HEIGHT: i32 = 1;

//! AVL tree over arena-resident nodes.
//!
//! The tree is only a root handle. All node storage belongs to the caller's
//! [`NodeArena`]; insertion links an existing node in and restores the AVL
//! balance invariant on the way back up:
//!
//! ```text
//! insert(node) → descend by key → link as leaf
//!              → per ancestor: update height → check balance → rotate 0, 1 or 2 times
//!              → returned subtree root becomes the parent's child (or the tree root)
//! ```
//!
//! Equal keys route right, so `find` always returns the shallowest match on
//! the search path.

use super::arena::{NodeArena, Side};
use super::constants::{LEAF_HEIGHT, MAX_PATH_DEPTH};
use log::trace;
use ordix_common::{NodeId, OrdixError, Result};
use std::cmp::Ordering;

/// Root handle of an AVL tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvlTree {
    root: Option<NodeId>,
}

impl AvlTree {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Wraps an already-built subtree.
    pub(crate) const fn with_root(root: Option<NodeId>) -> Self {
        Self { root }
    }

    /// Resets the tree to empty. Nodes stay in the arena untouched.
    pub fn init(&mut self) {
        self.root = None;
    }

    /// Returns the root handle.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns true if no node has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the whole tree (0 when empty).
    #[inline]
    pub fn height<V>(&self, arena: &NodeArena<V>) -> i32 {
        arena.height(self.root)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Finds the shallowest node with the given key.
    pub fn find<V>(&self, arena: &NodeArena<V>, key: u64) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(current) = cursor {
            let node = arena.node(current);
            cursor = match key.cmp(&node.index()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Links `node` into the tree and rebalances.
    ///
    /// `node` must come from `arena`, be unlinked, and not be reachable from
    /// this tree. Duplicate keys are accepted and placed to the right.
    pub fn insert<V>(&mut self, arena: &mut NodeArena<V>, node: NodeId) {
        check_unlinked(arena, node);
        self.root = Some(insert_at(arena, self.root, node));
    }

    /// Same result as [`insert`](Self::insert), without recursion.
    ///
    /// Records the descent in a fixed path buffer, then rebalances each
    /// ancestor bottom-up. A balanced tree always fits the buffer; deeper
    /// paths (e.g. unbalanced fixtures) spill into a heap-allocated tail.
    pub fn insert_iterative<V>(&mut self, arena: &mut NodeArena<V>, node: NodeId) {
        check_unlinked(arena, node);
        let key = arena.node(node).index();

        let mut path = [(NodeId::INVALID, Side::Left); MAX_PATH_DEPTH];
        let mut depth = 0;
        let mut overflow: Vec<(NodeId, Side)> = Vec::new();

        let mut cursor = self.root;
        while let Some(current) = cursor {
            avl_invariant!(
                current != node,
                "insert: node {} is already in the tree",
                node
            );
            let side = if key < arena.node(current).index() {
                Side::Left
            } else {
                Side::Right
            };
            if depth < MAX_PATH_DEPTH {
                path[depth] = (current, side);
                depth += 1;
            } else {
                overflow.push((current, side));
            }
            cursor = arena.node(current).child(side);
        }

        arena.node_mut(node).height = LEAF_HEIGHT;

        let mut subtree = node;
        for &(parent, side) in overflow.iter().rev().chain(path[..depth].iter().rev()) {
            arena.node_mut(parent).set_child(side, Some(subtree));
            subtree = rebalance(arena, parent);
        }
        self.root = Some(subtree);
    }

    /// Inserts `node` unless its key is already present.
    ///
    /// Unlike [`insert`](Self::insert), precondition failures are reported
    /// as errors and leave the tree unchanged.
    pub fn insert_unique<V>(&mut self, arena: &mut NodeArena<V>, node: NodeId) -> Result<()> {
        let entry = arena.get(node).ok_or(OrdixError::NodeNotFound(node))?;
        let index = entry.index();
        if entry.is_linked() || entry.left.is_some() || entry.right.is_some() {
            return Err(OrdixError::NodeAlreadyLinked { node, index });
        }
        if self.find(arena, index).is_some() {
            return Err(OrdixError::DuplicateKey { index });
        }
        self.root = Some(insert_at(arena, self.root, node));
        Ok(())
    }
}

/// Insert precondition: a fresh node with no links.
#[inline(always)]
fn check_unlinked<V>(arena: &NodeArena<V>, node: NodeId) {
    let entry = arena.node(node);
    avl_invariant!(
        !entry.is_linked() && entry.left.is_none() && entry.right.is_none(),
        "insert: node {} with key {} is already linked",
        node,
        entry.index()
    );
}

/// Inserts `node` below `subtree` and returns the new subtree root.
fn insert_at<V>(arena: &mut NodeArena<V>, subtree: Option<NodeId>, node: NodeId) -> NodeId {
    let Some(current) = subtree else {
        arena.node_mut(node).height = LEAF_HEIGHT;
        return node;
    };
    avl_invariant!(
        current != node,
        "insert: node {} is already in the tree",
        node
    );

    let side = if arena.node(node).index() < arena.node(current).index() {
        Side::Left
    } else {
        Side::Right
    };
    let child = arena.node(current).child(side);
    let child = insert_at(arena, child, node);
    arena.node_mut(current).set_child(side, Some(child));

    rebalance(arena, current)
}

/// Refreshes `node`'s height and applies the rotations its balance factor
/// calls for. Returns the root of the rebalanced subtree.
fn rebalance<V>(arena: &mut NodeArena<V>, node: NodeId) -> NodeId {
    let (left, right) = {
        let entry = arena.node(node);
        (entry.left, entry.right)
    };
    let left_height = arena.height(left);
    let right_height = arena.height(right);
    arena.node_mut(node).height = 1 + left_height.max(right_height);
    let balance = left_height - right_height;

    if balance > 1 {
        // Left-right case: straighten the left child first.
        if let Some(child) = left {
            let child_entry = arena.node(child);
            if arena.height(child_entry.left) < arena.height(child_entry.right) {
                let straightened = rotate_left(arena, child);
                arena.node_mut(node).left = Some(straightened);
            }
        }
        return rotate_right(arena, node);
    }

    if balance < -1 {
        // Right-left case: straighten the right child first.
        if let Some(child) = right {
            let child_entry = arena.node(child);
            if arena.height(child_entry.right) < arena.height(child_entry.left) {
                let straightened = rotate_right(arena, child);
                arena.node_mut(node).right = Some(straightened);
            }
        }
        return rotate_left(arena, node);
    }

    node
}

// =============================================================================
// Rotation Primitives
// =============================================================================

/// Rotates `old_root` right and returns the new subtree root.
///
/// ```text
///       old            new
///      /   \          /   \
///    new    c   →    a    old
///   /   \                /   \
///  a     b              b     c
/// ```
///
/// Only `old` and `new` are written. Heights are refreshed old first, since
/// the new root's height depends on it.
pub(crate) fn rotate_right<V>(arena: &mut NodeArena<V>, old_root: NodeId) -> NodeId {
    let Some(new_root) = arena.node(old_root).left else {
        panic!("rotate_right: node {} has no left child", old_root);
    };
    trace!(
        "rotate_right: key {} over key {}",
        arena.node(new_root).index(),
        arena.node(old_root).index()
    );

    let inner = arena.node(new_root).right;
    arena.node_mut(old_root).left = inner;
    arena.node_mut(new_root).right = Some(old_root);

    arena.update_height(old_root);
    arena.update_height(new_root);
    new_root
}

/// Mirror of [`rotate_right`].
pub(crate) fn rotate_left<V>(arena: &mut NodeArena<V>, old_root: NodeId) -> NodeId {
    let Some(new_root) = arena.node(old_root).right else {
        panic!("rotate_left: node {} has no right child", old_root);
    };
    trace!(
        "rotate_left: key {} over key {}",
        arena.node(new_root).index(),
        arena.node(old_root).index()
    );

    let inner = arena.node(new_root).left;
    arena.node_mut(old_root).right = inner;
    arena.node_mut(new_root).left = Some(old_root);

    arena.update_height(old_root);
    arena.update_height(new_root);
    new_root
}

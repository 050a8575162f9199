//! Caller-owned node storage for AVL indexes.
//!
//! Nodes live in a contiguous arena and are addressed by stable [`NodeId`]
//! handles. The tree never allocates, moves or frees a node: it only rewrites
//! the `left`, `right` and `height` fields of nodes that already exist here.

use super::constants::{EMPTY_HEIGHT, LEAF_HEIGHT};
use ordix_common::{NodeId, OrdixError, Result, MAX_NODES};

/// Which child slot of a node a descent took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// One entry in an AVL index.
///
/// Layout:
/// - index: caller-assigned key, never mutated by the tree
/// - left/right: child handles (`None` = absent subtree)
/// - height: cached subtree height (0 = not linked, 1 = leaf)
/// - value: caller payload
#[derive(Debug, Clone)]
pub struct AvlNode<V> {
    index: u64,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) height: i32,
    value: V,
}

impl<V> AvlNode<V> {
    /// Creates an unlinked node with the given key and payload.
    pub fn new(index: u64, value: V) -> Self {
        Self {
            index,
            left: None,
            right: None,
            height: EMPTY_HEIGHT,
            value,
        }
    }

    /// Returns the key.
    #[inline(always)]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the left child handle.
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child handle.
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the cached height of the subtree rooted here.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the payload.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the payload mutably.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the node and returns its payload.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns true once the node has been linked into a tree.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.height >= LEAF_HEIGHT
    }

    /// Clears both children and the cached height.
    ///
    /// Only meaningful for a node that is not reachable from any live tree,
    /// e.g. when reusing storage after the owning tree was reinitialized.
    pub fn reset_links(&mut self) {
        self.left = None;
        self.right = None;
        self.height = EMPTY_HEIGHT;
    }

    #[inline(always)]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Contiguous storage for AVL nodes.
///
/// Nodes are appended and never removed, so every issued [`NodeId`] stays
/// valid for the lifetime of the arena.
#[derive(Debug, Clone)]
pub struct NodeArena<V> {
    nodes: Vec<AvlNode<V>>,
}

impl<V> Default for NodeArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NodeArena<V> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity.min(MAX_NODES)),
        }
    }

    /// Stores a node and returns its handle.
    pub fn push(&mut self, node: AvlNode<V>) -> Result<NodeId> {
        let slot = self.nodes.len();
        if slot >= MAX_NODES {
            return Err(OrdixError::ArenaFull {
                capacity: MAX_NODES,
            });
        }
        self.nodes.push(node);
        Ok(NodeId::new(slot as u32))
    }

    /// Stores a fresh unlinked node and returns its handle.
    #[inline]
    pub fn alloc(&mut self, index: u64, value: V) -> Result<NodeId> {
        self.push(AvlNode::new(index, value))
    }

    /// Gets a node by handle.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&AvlNode<V>> {
        self.nodes.get(id.slot())
    }

    /// Gets a mutable node by handle.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut AvlNode<V>> {
        self.nodes.get_mut(id.slot())
    }

    /// Number of nodes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node has been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears the links of every node so the storage can back a new tree.
    pub fn unlink_all(&mut self) {
        for node in &mut self.nodes {
            node.reset_links();
        }
    }

    /// Height oracle: 0 for an absent subtree, else the cached height.
    #[inline(always)]
    pub fn height(&self, id: Option<NodeId>) -> i32 {
        match id {
            Some(id) => self.node(id).height,
            None => EMPTY_HEIGHT,
        }
    }

    /// Direct node access. Panics on a handle this arena never issued.
    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &AvlNode<V> {
        &self.nodes[id.slot()]
    }

    /// Direct mutable node access. Panics on a handle this arena never issued.
    #[inline(always)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut AvlNode<V> {
        &mut self.nodes[id.slot()]
    }

    /// Recomputes a node's height from its children and returns it.
    #[inline(always)]
    pub(crate) fn update_height(&mut self, id: NodeId) -> i32 {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        let height = 1 + self.height(left).max(self.height(right));
        self.node_mut(id).height = height;
        height
    }
}

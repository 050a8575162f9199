//! Self-contained AVL index owning its node storage.

use super::arena::{AvlNode, NodeArena};
use super::check::{validate, TreeStats};
use super::tree::AvlTree;
use log::debug;
use ordix_common::{DuplicatePolicy, IndexConfig, InsertStrategy, NodeId, OrdixError, Result};

/// Ordered index from `u64` keys to payloads.
///
/// Bundles a [`NodeArena`] with an [`AvlTree`] for hosts that do not need
/// to manage node storage themselves. Every stored node is linked into the
/// tree, so `len()` is the number of inserted entries.
#[derive(Debug, Clone)]
pub struct AvlIndex<V> {
    arena: NodeArena<V>,
    tree: AvlTree,
    config: IndexConfig,
}

impl<V> Default for AvlIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AvlIndex<V> {
    /// Creates an index with the default configuration.
    pub fn new() -> Self {
        Self::build(IndexConfig::default())
    }

    /// Creates an index with the given configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndexConfig) -> Self {
        debug!(
            "Creating AVL index: capacity={}, strategy={:?}, duplicates={:?}, validate_on_insert={}",
            config.initial_capacity, config.strategy, config.duplicates, config.validate_on_insert
        );
        Self {
            arena: NodeArena::with_capacity(config.initial_capacity),
            tree: AvlTree::new(),
            config,
        }
    }

    /// Inserts a key and payload, returning the new node's handle.
    ///
    /// With [`DuplicatePolicy::Reject`] an existing key fails with
    /// `DuplicateKey` and nothing is stored.
    pub fn insert(&mut self, index: u64, value: V) -> Result<NodeId> {
        if self.config.duplicates == DuplicatePolicy::Reject && self.contains(index) {
            return Err(OrdixError::DuplicateKey { index });
        }
        self.link(index, value)
    }

    /// Inserts a key and payload unless the key is present, whatever the
    /// configured duplicate policy.
    pub fn insert_unique(&mut self, index: u64, value: V) -> Result<NodeId> {
        if self.contains(index) {
            return Err(OrdixError::DuplicateKey { index });
        }
        self.link(index, value)
    }

    fn link(&mut self, index: u64, value: V) -> Result<NodeId> {
        let id = self.arena.alloc(index, value)?;
        match self.config.strategy {
            InsertStrategy::Recursive => self.tree.insert(&mut self.arena, id),
            InsertStrategy::Iterative => self.tree.insert_iterative(&mut self.arena, id),
        }

        if self.config.validate_on_insert {
            if let Err(err) = validate(&self.tree, &self.arena) {
                panic!("AVL invariant violated after inserting key {}: {}", index, err);
            }
        }
        Ok(id)
    }

    /// Returns the handle of the shallowest node with the given key.
    #[inline]
    pub fn find(&self, index: u64) -> Option<NodeId> {
        self.tree.find(&self.arena, index)
    }

    /// Returns true if the key is present.
    #[inline]
    pub fn contains(&self, index: u64) -> bool {
        self.find(index).is_some()
    }

    /// Returns the payload stored under the key.
    pub fn get(&self, index: u64) -> Option<&V> {
        self.find(index)
            .and_then(|id| self.arena.get(id))
            .map(AvlNode::value)
    }

    /// Returns the payload stored under the key, mutably.
    pub fn get_mut(&mut self, index: u64) -> Option<&mut V> {
        let id = self.find(index)?;
        self.arena.get_mut(id).map(AvlNode::value_mut)
    }

    /// Returns a node by handle.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&AvlNode<V>> {
        self.arena.get(id)
    }

    /// Returns the tree height (0 when empty).
    #[inline]
    pub fn height(&self) -> i32 {
        self.tree.height(&self.arena)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the underlying tree.
    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// Returns the underlying node storage.
    pub fn arena(&self) -> &NodeArena<V> {
        &self.arena
    }

    /// Returns the configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Audits the whole tree.
    pub fn validate(&self) -> Result<TreeStats> {
        validate(&self.tree, &self.arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_index_is_empty() {
        let index: AvlIndex<String> = AvlIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        assert!(index.get(1).is_none());
        assert_eq!(index.config(), &IndexConfig::default());
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = AvlIndex::new();
        index.insert(10, "ten").unwrap();
        index.insert(5, "five").unwrap();
        index.insert(20, "twenty").unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(5), Some(&"five"));
        assert_eq!(index.get(10), Some(&"ten"));
        assert_eq!(index.get(20), Some(&"twenty"));
        assert!(index.get(15).is_none());
        assert_eq!(index.height(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut index = AvlIndex::new();
        index.insert(1, 100u32).unwrap();
        *index.get_mut(1).unwrap() += 1;
        assert_eq!(index.get(1), Some(&101));
        assert!(index.get_mut(2).is_none());
    }

    #[test]
    fn test_node_lookup_by_handle() {
        let mut index = AvlIndex::new();
        let id = index.insert(33, ()).unwrap();
        assert_eq!(index.find(33), Some(id));
        assert_eq!(index.node(id).unwrap().index(), 33);
        assert!(index.node(NodeId::new(50)).is_none());
    }

    #[test]
    fn test_duplicates_allowed_by_default() {
        let mut index = AvlIndex::new();
        let first = index.insert(7, 'a').unwrap();
        index.insert(7, 'b').unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.find(7), Some(first));
        assert_eq!(index.get(7), Some(&'a'));
    }

    #[test]
    fn test_duplicates_rejected_by_policy() {
        let config = IndexConfig {
            duplicates: DuplicatePolicy::Reject,
            ..Default::default()
        };
        let mut index = AvlIndex::with_config(config).unwrap();
        index.insert(7, 'a').unwrap();

        let result = index.insert(7, 'b');
        assert!(matches!(result, Err(OrdixError::DuplicateKey { index: 7 })));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(7), Some(&'a'));
    }

    #[test]
    fn test_insert_unique_ignores_policy() {
        let mut index = AvlIndex::new();
        index.insert_unique(3, 0).unwrap();
        assert!(matches!(
            index.insert_unique(3, 1),
            Err(OrdixError::DuplicateKey { index: 3 })
        ));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_iterative_strategy() {
        let config = IndexConfig {
            strategy: InsertStrategy::Iterative,
            validate_on_insert: true,
            ..Default::default()
        };
        let mut index = AvlIndex::with_config(config).unwrap();
        for key in (0..200u64).rev() {
            index.insert(key, key * 2).unwrap();
        }

        for key in 0..200u64 {
            assert_eq!(index.get(key), Some(&(key * 2)));
        }
        let stats = index.validate().unwrap();
        assert_eq!(stats.len, 200);
        assert_eq!(stats.height, index.height());
    }

    #[test]
    fn test_validate_on_insert() {
        let config = IndexConfig {
            validate_on_insert: true,
            ..Default::default()
        };
        let mut index = AvlIndex::with_config(config).unwrap();
        for key in [50u64, 40, 30, 20, 10, 45, 35, 25] {
            index.insert(key, ()).unwrap();
        }
        assert_eq!(index.validate().unwrap().len, 8);
    }

    #[test]
    fn test_with_config_rejects_oversized_capacity() {
        let config = IndexConfig {
            initial_capacity: ordix_common::MAX_NODES,
            ..Default::default()
        };
        let result: Result<AvlIndex<u64>> = AvlIndex::with_config(config);
        assert!(matches!(
            result,
            Err(OrdixError::InvalidParameter { ref name, .. }) if name == "initial_capacity"
        ));
    }

    #[test]
    fn test_tree_and_arena_accessors() {
        let mut index = AvlIndex::new();
        index.insert(2, ()).unwrap();
        index.insert(1, ()).unwrap();
        assert_eq!(index.arena().len(), 2);
        assert_eq!(index.tree().find(index.arena(), 1), index.find(1));
    }
}

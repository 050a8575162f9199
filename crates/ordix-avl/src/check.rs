//! Full-tree structural audit.
//!
//! Walks every reachable node and verifies, in order:
//! - every handle resolves and no node is reachable twice
//! - in-order keys are non-decreasing
//! - every cached height equals 1 + max(child heights)
//! - every balance factor lies in {-1, 0, 1}
//!
//! The walks use explicit stacks, so arbitrarily deep (unbalanced) fixture
//! trees can be audited too.

use super::arena::NodeArena;
use super::tree::AvlTree;
use log::warn;
use ordix_common::{NodeId, OrdixError, Result};

/// Summary of a tree that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of reachable nodes.
    pub len: usize,
    /// Height of the root (0 when empty).
    pub height: i32,
}

/// Audits the tree rooted at `tree.root()`.
pub fn validate<V>(tree: &AvlTree, arena: &NodeArena<V>) -> Result<TreeStats> {
    let result = audit(tree.root(), arena);
    if let Err(err) = &result {
        warn!("AVL validation failed: {}", err);
    }
    result
}

fn audit<V>(root: Option<NodeId>, arena: &NodeArena<V>) -> Result<TreeStats> {
    let Some(root) = root else {
        return Ok(TreeStats::default());
    };

    let len = check_order(root, arena)?;
    let height = check_heights(root, arena)?;
    Ok(TreeStats { len, height })
}

/// In-order walk. Rejects dangling handles, shared nodes and out-of-order
/// keys. Returns the node count.
fn check_order<V>(root: NodeId, arena: &NodeArena<V>) -> Result<usize> {
    let mut visited = vec![false; arena.len()];
    let mut stack = Vec::new();
    let mut cursor = Some(root);
    let mut previous: Option<u64> = None;
    let mut count = 0;

    loop {
        while let Some(id) = cursor {
            let node = arena.get(id).ok_or(OrdixError::NodeNotFound(id))?;
            if std::mem::replace(&mut visited[id.slot()], true) {
                return Err(OrdixError::CycleDetected { node: id });
            }
            stack.push(id);
            cursor = node.left();
        }

        let Some(id) = stack.pop() else {
            break;
        };
        let node = arena.node(id);
        if let Some(previous) = previous {
            if node.index() < previous {
                return Err(OrdixError::OrderViolation {
                    index: node.index(),
                    previous,
                });
            }
        }
        previous = Some(node.index());
        count += 1;
        cursor = node.right();
    }

    Ok(count)
}

/// Post-order walk. Must only run on a tree `check_order` accepted.
/// Returns the root height.
fn check_heights<V>(root: NodeId, arena: &NodeArena<V>) -> Result<i32> {
    let mut computed = vec![0i32; arena.len()];
    let mut stack = vec![(root, false)];

    while let Some((id, children_done)) = stack.pop() {
        let node = arena.node(id);
        if !children_done {
            stack.push((id, true));
            if let Some(right) = node.right() {
                stack.push((right, false));
            }
            if let Some(left) = node.left() {
                stack.push((left, false));
            }
            continue;
        }

        let left_height = node.left().map_or(0, |child| computed[child.slot()]);
        let right_height = node.right().map_or(0, |child| computed[child.slot()]);
        let height = 1 + left_height.max(right_height);
        if node.height() != height {
            return Err(OrdixError::HeightMismatch {
                index: node.index(),
                stored: node.height(),
                computed: height,
            });
        }

        let balance = left_height - right_height;
        if balance.abs() > 1 {
            return Err(OrdixError::Unbalanced {
                index: node.index(),
                balance,
            });
        }
        computed[id.slot()] = height;
    }

    Ok(computed[root.slot()])
}

//! Builds trees of an exact shape, balanced or not.
//!
//! A fixture is a pre-order listing of keys where `None` marks an absent
//! child. The tree
//!
//! ```text
//!       10
//!      /  \
//!     5    15
//! ```
//!
//! is written `[Some(10), Some(5), None, None, Some(15), None, None]`.
//! Heights are computed bottom-up, so the result is a consistent but not
//! necessarily balanced tree. Useful for exercising rotations in isolation
//! and for comparing insertion results against an expected shape.

use super::arena::{NodeArena, Side};
use super::tree::AvlTree;
use ordix_common::{NodeId, OrdixError, Result};

/// Builds the subtree described by `listing` into `arena`.
///
/// Returns the root handle, or `None` for the empty listing `[None]`.
/// Payloads are `V::default()`. Uses an explicit stack, so listings of any
/// depth are accepted.
pub fn from_preorder<V: Default>(
    arena: &mut NodeArena<V>,
    listing: &[Option<u64>],
) -> Result<Option<NodeId>> {
    let mut pos = 0;
    let root = next_entry(arena, listing, &mut pos)?;

    // Each frame is a node and the child slot it still waits for
    // (`None` once both children are linked).
    let mut stack: Vec<(NodeId, Option<Side>)> = Vec::new();
    if let Some(root) = root {
        stack.push((root, Some(Side::Left)));
    }

    while let Some(frame) = stack.last_mut() {
        let (id, pending) = *frame;
        let Some(side) = pending else {
            stack.pop();
            arena.update_height(id);
            continue;
        };
        frame.1 = match side {
            Side::Left => Some(Side::Right),
            Side::Right => None,
        };

        let child = next_entry(arena, listing, &mut pos)?;
        arena.node_mut(id).set_child(side, child);
        if let Some(child) = child {
            stack.push((child, Some(Side::Left)));
        }
    }

    if pos != listing.len() {
        return Err(OrdixError::MalformedFixture(format!(
            "{} trailing entries after position {}",
            listing.len() - pos,
            pos
        )));
    }
    Ok(root)
}

/// Like [`from_preorder`], wrapped as a tree.
pub fn tree_from_preorder<V: Default>(
    arena: &mut NodeArena<V>,
    listing: &[Option<u64>],
) -> Result<AvlTree> {
    from_preorder(arena, listing).map(AvlTree::with_root)
}

/// Consumes one listing entry, allocating a node for a present key.
fn next_entry<V: Default>(
    arena: &mut NodeArena<V>,
    listing: &[Option<u64>],
    pos: &mut usize,
) -> Result<Option<NodeId>> {
    let Some(&entry) = listing.get(*pos) else {
        return Err(OrdixError::MalformedFixture(format!(
            "listing ends early at position {}",
            pos
        )));
    };
    *pos += 1;

    match entry {
        Some(index) => arena.alloc(index, V::default()).map(Some),
        None => Ok(None),
    }
}

/// Returns true if both subtrees have the same keys and cached heights at
/// every position.
pub fn same_shape<V, W>(
    arena: &NodeArena<V>,
    root: Option<NodeId>,
    other_arena: &NodeArena<W>,
    other_root: Option<NodeId>,
) -> bool {
    let mut stack = vec![(root, other_root)];
    while let Some(pair) = stack.pop() {
        match pair {
            (None, None) => {}
            (Some(a), Some(b)) => {
                let (Some(a), Some(b)) = (arena.get(a), other_arena.get(b)) else {
                    return false;
                };
                if a.index() != b.index() || a.height() != b.height() {
                    return false;
                }
                stack.push((a.left(), b.left()));
                stack.push((a.right(), b.right()));
            }
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: Option<u64> = None;

    #[test]
    fn test_single_node() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let root = from_preorder(&mut arena, &[Some(7), N, N]).unwrap().unwrap();
        let node = arena.get(root).unwrap();
        assert_eq!(node.index(), 7);
        assert_eq!(node.height(), 1);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn test_empty_listing() {
        let mut arena: NodeArena<()> = NodeArena::new();
        assert!(from_preorder(&mut arena, &[N]).unwrap().is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_heights_computed_bottom_up() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let tree = tree_from_preorder(
            &mut arena,
            &[Some(10), Some(5), Some(3), Some(1), N, N, N, Some(7), N, N, Some(15), N, N],
        )
        .unwrap();

        let height_of = |key| arena.get(tree.find(&arena, key).unwrap()).unwrap().height();
        assert_eq!(height_of(1), 1);
        assert_eq!(height_of(3), 2);
        assert_eq!(height_of(7), 1);
        assert_eq!(height_of(5), 3);
        assert_eq!(height_of(15), 1);
        assert_eq!(height_of(10), 4);
    }

    #[test]
    fn test_deep_listing() {
        // Left-leaning chain far deeper than any recursion could handle.
        const DEPTH: u64 = 200_000;
        let mut listing = Vec::with_capacity(DEPTH as usize * 2 + 1);
        for key in (0..DEPTH).rev() {
            listing.push(Some(key));
        }
        listing.extend(std::iter::repeat(N).take(DEPTH as usize + 1));

        let mut arena: NodeArena<()> = NodeArena::new();
        let tree = tree_from_preorder(&mut arena, &listing).unwrap();
        assert_eq!(arena.len(), DEPTH as usize);
        assert_eq!(tree.height(&arena), DEPTH as i32);
        assert_eq!(arena.get(tree.find(&arena, 0).unwrap()).unwrap().height(), 1);

        let err = crate::check::validate(&tree, &arena).unwrap_err();
        assert!(matches!(err, OrdixError::Unbalanced { .. }));
    }

    #[test]
    fn test_truncated_listing() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let err = from_preorder(&mut arena, &[Some(1), Some(2), N]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed fixture: listing ends early at position 3"
        );

        let err = from_preorder(&mut arena, &[]).unwrap_err();
        assert!(matches!(err, OrdixError::MalformedFixture(_)));
    }

    #[test]
    fn test_trailing_entries() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let err = from_preorder(&mut arena, &[Some(1), N, N, Some(2)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed fixture: 1 trailing entries after position 3"
        );
    }

    #[test]
    fn test_same_shape() {
        let listing = [Some(2), Some(1), N, N, Some(3), N, N];
        let mut a: NodeArena<()> = NodeArena::new();
        let mut b: NodeArena<String> = NodeArena::new();
        let ra = from_preorder(&mut a, &listing).unwrap();
        let rb = from_preorder(&mut b, &listing).unwrap();
        assert!(same_shape(&a, ra, &b, rb));
        assert!(same_shape(&a, None, &b, None));
    }

    #[test]
    fn test_same_shape_detects_differences() {
        let mut arena: NodeArena<()> = NodeArena::new();
        let base = from_preorder(&mut arena, &[Some(2), Some(1), N, N, Some(3), N, N]).unwrap();
        let other_key =
            from_preorder(&mut arena, &[Some(2), Some(1), N, N, Some(4), N, N]).unwrap();
        let missing_right = from_preorder(&mut arena, &[Some(2), Some(1), N, N, N]).unwrap();
        let mirrored = from_preorder(&mut arena, &[Some(2), N, Some(3), N, N]).unwrap();

        assert!(!same_shape(&arena, base, &arena, other_key));
        assert!(!same_shape(&arena, base, &arena, missing_right));
        assert!(!same_shape(&arena, missing_right, &arena, mirrored));
        assert!(!same_shape(&arena, base, &arena, None));
    }
}

//! AVL ordered index for ordix.
//!
//! This crate provides:
//! - Caller-owned node storage addressed by stable handles
//! - AVL tree insert (recursive or iterative) and exact-key lookup
//! - A self-contained index bundling storage and tree
//! - Full-tree structural validation
//! - Fixture construction of exact tree shapes
//!
//! ## Storage model
//!
//! ```text
//! NodeArena<V>: [ node#0 | node#1 | node#2 | ... ]   (caller-owned, append-only)
//!                   ↑ left/right/height rewritten by rotations, never moved
//! AvlTree:      root: Option<NodeId>                 (nothing else)
//! ```
//!
//! The tree never allocates nodes. A host either manages a [`NodeArena`]
//! itself and links nodes with [`AvlTree::insert`], or lets [`AvlIndex`]
//! do both.
//!
//! The structure is not thread-safe beyond what `&`/`&mut` already enforce:
//! shared access needs an external lock.

#[macro_use]
mod macros;

mod arena;
mod check;
mod constants;
mod index;
mod tree;

pub mod fixture;

pub use arena::{AvlNode, NodeArena};
pub use check::{validate, TreeStats};
pub use constants::MAX_PATH_DEPTH;
pub use index::AvlIndex;
pub use tree::AvlTree;

pub use ordix_common::{
    DuplicatePolicy, IndexConfig, InsertStrategy, NodeId, OrdixError, Result,
};

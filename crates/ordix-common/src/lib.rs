//! ordix common types, errors, and configuration.
//!
//! This crate provides shared definitions used by the ordix index crates.

pub mod config;
pub mod error;
pub mod node;

pub use config::{DuplicatePolicy, IndexConfig, InsertStrategy, MAX_INITIAL_CAPACITY};
pub use error::{OrdixError, Result};
pub use node::{NodeId, MAX_NODES};

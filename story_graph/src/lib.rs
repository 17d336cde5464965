//! # Story Graph
//!
//! The "Story Bible" crate - the data model of a branching narrative.
//! A story is a set of nodes, each holding prose and an ordered list of
//! choices; the directed graph is implicit in the choice targets.
//!
//! This crate performs no I/O and knows nothing about players. Traversal,
//! validation, authoring and persistence live in `story_engine`.

pub mod error;
pub mod nodes;
pub mod store;

pub use error::*;
pub use nodes::*;
pub use store::*;

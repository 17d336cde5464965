//! # Story Engine
//!
//! Plays and authors branching stories built on `story_graph`.
//!
//! ## Core Components
//!
//! - **session**: A player's cursor through the story plus accumulated state
//! - **validator**: Static checks for dangling choices, orphans and cycles
//! - **editor**: Authoring operations that keep track of the story file
//! - **codec**: JSON persistence for story definitions and session saves
//! - **game**: Player-facing façade tying a story and a session together
//!
//! ## Design Philosophy
//!
//! - **Read-only play**: Sessions never mutate the story they traverse
//! - **Advisory validation**: Diagnostics are reported, never enforced
//! - **Explicit configuration**: Everything configurable is passed in as an [`EngineConfig`]

pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod game;
pub mod session;
pub mod validator;

pub use codec::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use game::*;
pub use session::*;
pub use validator::*;

pub use story_graph::{Choice, Connection, NodeId, NodeStore, StoreError, StoryNode};

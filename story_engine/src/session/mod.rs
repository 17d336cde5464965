//! Session - a player's position in a story plus everything they have
//! accumulated along the way.
//!
//! A session only ever holds node ids. Every read goes through the
//! [`NodeStore`] passed in by the caller, and the store is never mutated.
//!
//! States are `Unstarted` (no current node) or a node id. There is no
//! distinguished terminal state: a node with no choices is simply a dead end.

mod state;

pub use state::*;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use story_graph::{Choice, Connection, NodeId, NodeStore, StoreError};
use tracing::warn;

use crate::config::EngineConfig;

/// Maximum number of content entries kept in a session's history.
pub const HISTORY_CAPACITY: usize = 10;

/// A live traversal of a story.
///
/// Serializes directly to the save layout:
/// `{current_node, story_state: {...}, history}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "current_node")]
    current: Option<NodeId>,

    #[serde(rename = "story_state")]
    pub state: StoryState,

    /// Content of the most recently shown nodes, oldest first.
    #[serde(default)]
    history: VecDeque<String>,
}

impl Session {
    /// Create an unstarted session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session positioned at the configured entry node.
    pub fn begin(config: &EngineConfig) -> Self {
        let mut session = Self::new();
        session.start(config.entry_node.clone());
        session
    }

    /// Move the cursor to an entry node. Accumulated state is kept.
    pub fn start(&mut self, entry: impl Into<NodeId>) {
        self.current = Some(entry.into());
    }

    /// Check if the session has a current node.
    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// The current node id, if started.
    pub fn current(&self) -> Option<&NodeId> {
        self.current.as_ref()
    }

    /// Show the current node.
    ///
    /// Returns `Ok(None)` if the session has not started. Otherwise records
    /// the visit, pushes the content onto the history and returns it. A
    /// current node missing from the store is `NodeNotFound` and leaves the
    /// session untouched.
    pub fn current_content<'s>(
        &mut self,
        store: &'s NodeStore,
    ) -> Result<Option<&'s str>, StoreError> {
        let Some(current) = &self.current else {
            return Ok(None);
        };

        let node = store.get_node(current.as_str())?;
        self.state.mark_visited(current);
        self.push_history(node.content.clone());

        Ok(Some(node.content.as_str()))
    }

    /// The current node's choices, or an empty slice if not started.
    pub fn current_choices<'s>(&self, store: &'s NodeStore) -> Result<&'s [Choice], StoreError> {
        match &self.current {
            Some(current) => Ok(store.get_node(current.as_str())?.choices.as_slice()),
            None => Ok(&[][..]),
        }
    }

    /// Follow the choice at `index`.
    ///
    /// Returns `Ok(false)` without changing anything if the session has not
    /// started or the index is out of range. The target is not checked
    /// against the store; a dangling target surfaces as `NodeNotFound` on
    /// the next read.
    pub fn make_choice(&mut self, store: &NodeStore, index: usize) -> Result<bool, StoreError> {
        if self.current.is_none() {
            return Ok(false);
        }

        let Some(choice) = self.current_choices(store)?.get(index) else {
            return Ok(false);
        };

        if !store.contains(choice.target.as_str()) {
            warn!(
                target_node = %choice.target,
                choice = %choice.text,
                "following a choice to a node that does not exist"
            );
        }

        self.current = Some(choice.target.clone());
        Ok(true)
    }

    /// Outgoing connections of the current node, or empty if not started.
    pub fn connections(&self, store: &NodeStore) -> Result<Vec<Connection>, StoreError> {
        match &self.current {
            Some(current) => store.neighbors(current.as_str()),
            None => Ok(Vec::new()),
        }
    }

    /// Visited node ids in first-visit order.
    pub fn visited(&self) -> &[NodeId] {
        &self.state.visited
    }

    /// Recently shown content, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Number of entries in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn push_history(&mut self, content: String) {
        self.history.push_back(content);
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Restore the history bound and drop repeated visits, e.g. after
    /// reading a hand-edited save.
    pub(crate) fn normalize(&mut self) {
        self.trim_history();
        self.state.dedup_visited();
    }

    /// Add an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.state.inventory.push(item.into());
    }

    /// Remove the first matching item. Returns false if it was not held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.state.inventory.iter().position(|i| i == item) {
            Some(pos) => {
                self.state.inventory.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check if an item is held.
    pub fn has_item(&self, item: &str) -> bool {
        self.state.inventory.iter().any(|i| i == item)
    }

    /// Set a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) {
        self.state.flags.insert(name.into(), value.into());
    }

    /// Get a flag.
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.state.flags.get(name)
    }

    /// Set a stat.
    pub fn set_stat(&mut self, name: impl Into<String>, value: f64) {
        self.state.stats.insert(name.into(), value);
    }

    /// Add `delta` to a stat (missing stats start at zero). Returns the new value.
    pub fn adjust_stat(&mut self, name: impl Into<String>, delta: f64) -> f64 {
        let stat = self.state.stats.entry(name.into()).or_insert(0.0);
        *stat += delta;
        *stat
    }

    /// Get a stat.
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.state.stats.get(name).copied()
    }
}

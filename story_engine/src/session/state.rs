//! Accumulated player state carried by a session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use story_graph::NodeId;

/// Flag value types for story state.
///
/// Scalars get their own variants; anything else a save may carry (null,
/// arrays, objects) is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        FlagValue::Bool(v)
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        FlagValue::Int(v)
    }
}

impl From<f64> for FlagValue {
    fn from(v: f64) -> Self {
        FlagValue::Float(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        FlagValue::String(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        FlagValue::String(v)
    }
}

impl From<serde_json::Value> for FlagValue {
    fn from(v: serde_json::Value) -> Self {
        FlagValue::Json(v)
    }
}

/// Everything a player has accumulated so far.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryState {
    /// Item ids in pickup order.
    #[serde(default)]
    pub inventory: Vec<String>,

    /// Visited nodes in first-visit order, without duplicates.
    #[serde(default, rename = "visited_nodes")]
    pub visited: Vec<NodeId>,

    #[serde(default, rename = "player_stats")]
    pub stats: BTreeMap<String, f64>,

    #[serde(default)]
    pub flags: BTreeMap<String, FlagValue>,
}

impl StoryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns false if the node was already visited.
    pub fn mark_visited(&mut self, id: &NodeId) -> bool {
        if self.visited.contains(id) {
            return false;
        }
        self.visited.push(id.clone());
        true
    }

    /// Check whether a node has been visited.
    pub fn has_visited(&self, id: &str) -> bool {
        self.visited.iter().any(|v| v.as_str() == id)
    }

    /// Drop repeated visits, keeping first-visit order.
    pub(crate) fn dedup_visited(&mut self) {
        let mut seen = HashSet::new();
        self.visited.retain(|id| seen.insert(id.clone()));
    }

    /// Name of the first stat or float flag holding NaN or an infinity.
    /// JSON has no encoding for these.
    pub fn non_finite(&self) -> Option<&str> {
        let stats = self.stats.iter().map(|(name, value)| (name, *value));
        let flags = self.flags.iter().filter_map(|(name, flag)| match flag {
            FlagValue::Float(value) => Some((name, *value)),
            _ => None,
        });

        stats
            .chain(flags)
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name.as_str())
    }
}

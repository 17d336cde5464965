//! Node definitions for the story graph.

mod choice;
mod story_node;

pub use choice::*;
pub use story_node::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Unique identifier for story nodes.
///
/// Ids are opaque author-chosen strings; the only thing the engine assumes
/// about them is that they are unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new("start").to_string(), "start");
    }

    #[test]
    fn test_node_id_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(NodeId::from("cellar"), 3);

        assert_eq!(map.get("cellar"), Some(&3));
        assert!(map.get("attic").is_none());
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeId::from("start")).unwrap();
        assert_eq!(json, "\"start\"");

        let id: NodeId = serde_json::from_str("\"room2\"").unwrap();
        assert_eq!(id, "room2");
    }
}

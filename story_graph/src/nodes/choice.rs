//! Choices - the labelled edges of the story graph.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A player-selectable option leading from one node to another.
///
/// Several choices may share a target; each one is still a separate edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the player.
    pub text: String,

    /// Node this choice leads to. Not required to exist.
    #[serde(rename = "next_node")]
    pub target: NodeId,
}

impl Choice {
    /// Create a new choice.
    pub fn new(text: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }

    /// Check whether this choice leads to the given node.
    pub fn leads_to(&self, id: &str) -> bool {
        self.target.as_str() == id
    }
}

/// An outgoing edge as seen from its source node, for visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub target: NodeId,
    pub choice_text: String,
}

impl From<&Choice> for Connection {
    fn from(choice: &Choice) -> Self {
        Self {
            target: choice.target.clone(),
            choice_text: choice.text.clone(),
        }
    }
}

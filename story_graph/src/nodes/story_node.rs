//! Story node definitions.

use serde::{Deserialize, Serialize};

use super::{Choice, NodeId};

/// A single passage of the story with its outgoing choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: NodeId,

    /// Prose shown when the player reaches this node.
    pub content: String,

    /// Outgoing choices. Order matters: the index is the selection key.
    pub choices: Vec<Choice>,
}

impl StoryNode {
    /// Create a node with no choices.
    pub fn new(id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            choices: Vec::new(),
        }
    }

    /// Append a choice.
    pub fn with_choice(mut self, text: impl Into<String>, target: impl Into<NodeId>) -> Self {
        self.choices.push(Choice::new(text, target));
        self
    }

    /// Append several choices, keeping their order.
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// A node without choices is a dead end.
    pub fn is_dead_end(&self) -> bool {
        self.choices.is_empty()
    }

    /// Check whether any choice leads to the given node.
    pub fn links_to(&self, id: &str) -> bool {
        self.choices.iter().any(|c| c.leads_to(id))
    }
}

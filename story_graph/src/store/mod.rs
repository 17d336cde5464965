//! Node Store - the story graph itself.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::nodes::{Choice, Connection, NodeId, StoryNode};

/// A directed edge derived from a single choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub from: &'a NodeId,
    /// Zero-based position of the choice within its source node.
    pub choice_index: usize,
    pub to: &'a NodeId,
}

/// The main story graph structure.
///
/// Nodes are kept in insertion order so encoding and diagnostics are
/// deterministic. Choice targets are not required to exist; dangling
/// references are tolerated here and reported by validation.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    /// All nodes in insertion order.
    nodes: Vec<StoryNode>,

    /// Index: NodeId -> position in `nodes`.
    index: HashMap<NodeId, usize>,
}

impl NodeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given content and choices.
    ///
    /// Fails with [`StoreError::DuplicateId`] if the id is already taken.
    /// Choice targets are not checked.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        content: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<&StoryNode, StoreError> {
        let node = StoryNode::new(id, content).with_choices(choices);
        self.insert(node)
    }

    /// Add a pre-built node.
    pub fn insert(&mut self, node: StoryNode) -> Result<&StoryNode, StoreError> {
        if self.index.contains_key(&node.id) {
            return Err(StoreError::DuplicateId(node.id));
        }

        let position = self.nodes.len();
        self.index.insert(node.id.clone(), position);
        self.nodes.push(node);
        Ok(&self.nodes[position])
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Result<&StoryNode, StoreError> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| StoreError::NodeNotFound(NodeId::new(id)))
    }

    /// Outgoing connections of a node, in choice order.
    pub fn neighbors(&self, id: &str) -> Result<Vec<Connection>, StoreError> {
        let node = self.get_node(id)?;
        Ok(node.choices.iter().map(Connection::from).collect())
    }

    /// Edit a node in place.
    ///
    /// `content` replaces the prose only. `choices` replaces the whole choice
    /// list; new targets are not checked.
    pub fn edit_node(
        &mut self,
        id: &str,
        content: Option<String>,
        choices: Option<Vec<Choice>>,
    ) -> Result<&StoryNode, StoreError> {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| StoreError::NodeNotFound(NodeId::new(id)))?;

        let node = &mut self.nodes[position];
        if let Some(content) = content {
            node.content = content;
        }
        if let Some(choices) = choices {
            node.choices = choices;
        }
        Ok(&*node)
    }

    /// Delete a node and strip every choice elsewhere that leads to it.
    ///
    /// Remaining choices keep their relative order. Nodes orphaned by the
    /// removal are left in place. Returns the removed node and the number of
    /// choices stripped from other nodes.
    pub fn delete_node(&mut self, id: &str) -> Result<(StoryNode, usize), StoreError> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| StoreError::NodeNotFound(NodeId::new(id)))?;

        let removed = self.nodes.remove(position);

        // Positions after the removed node shift down by one
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        let mut stripped = 0;
        for node in &mut self.nodes {
            let before = node.choices.len();
            node.choices.retain(|c| !c.leads_to(id));
            stripped += before - node.choices.len();
        }

        Ok((removed, stripped))
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the store has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.iter()
    }

    /// Iterate over all node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }

    /// Iterate over every edge, one per choice, including dangling ones.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.nodes.iter().flat_map(|node| {
            node.choices.iter().enumerate().map(move |(i, c)| Edge {
                from: &node.id,
                choice_index: i,
                to: &c.target,
            })
        })
    }

    /// Position of a node in insertion order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Check whether any choice in the store leads to the given node.
    pub fn is_targeted(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.links_to(id))
    }
}

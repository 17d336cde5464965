//! Story Editor - authoring operations over a story file.
//!
//! The editor owns a [`NodeStore`] and remembers where it was loaded from.
//! Mutations never validate; call [`StoryEditor::validate`] for feedback.

use std::path::{Path, PathBuf};
use story_graph::{Choice, NodeId, NodeStore, StoryNode};
use tracing::info;

use crate::codec::{load_story, save_story};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::validator::{Diagnostic, Validator};

/// An authoring session over one story.
#[derive(Debug, Clone)]
pub struct StoryEditor {
    store: NodeStore,
    path: Option<PathBuf>,
    config: EngineConfig,
}

impl StoryEditor {
    /// Start a new, empty story with no file attached.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: NodeStore::new(),
            path: None,
            config,
        }
    }

    /// Open an existing story file.
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let store = load_story(path)?;
        info!(path = %path.display(), nodes = store.len(), "opened story for editing");

        Ok(Self {
            store,
            path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Wrap an existing store.
    pub fn from_store(store: NodeStore, config: EngineConfig) -> Self {
        Self {
            store,
            path: None,
            config,
        }
    }

    /// Read access to the story.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Give up the editor and keep the story.
    pub fn into_store(self) -> NodeStore {
        self.store
    }

    /// The file this story was last opened from or saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Add a node. Fails with `DuplicateId` if the id is taken.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        content: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<&StoryNode, EngineError> {
        let node = self.store.add_node(id, content, choices)?;
        info!(node = %node.id, choices = node.choices.len(), "added node");
        Ok(node)
    }

    /// Edit a node. `choices`, when given, replaces the whole choice list.
    pub fn edit_node(
        &mut self,
        id: &str,
        content: Option<String>,
        choices: Option<Vec<Choice>>,
    ) -> Result<&StoryNode, EngineError> {
        let replaced_content = content.is_some();
        let replaced_choices = choices.is_some();

        let node = self.store.edit_node(id, content, choices)?;
        info!(
            node = %node.id,
            replaced_content,
            replaced_choices,
            "edited node"
        );
        Ok(node)
    }

    /// Delete a node and every choice leading to it.
    pub fn delete_node(&mut self, id: &str) -> Result<StoryNode, EngineError> {
        let (removed, stripped) = self.store.delete_node(id)?;
        info!(node = %removed.id, stripped_choices = stripped, "deleted node");
        Ok(removed)
    }

    /// Check the story for dangling choices, orphans and cycles.
    pub fn validate(&self) -> Vec<Diagnostic> {
        Validator::new(&self.config).check(&self.store)
    }

    /// Save the story.
    ///
    /// With a path, saves there and remembers it. Without one, saves to the
    /// remembered path or fails with `MissingPath`.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), EngineError> {
        if let Some(path) = path {
            self.path = Some(path.to_path_buf());
        }
        let target = self.path.as_deref().ok_or(EngineError::MissingPath)?;
        save_story(target, &self.store, self.config.pretty)
    }
}

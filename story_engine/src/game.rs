//! Game - a story being played.
//!
//! Ties a read-only [`NodeStore`] to a [`Session`] and exposes the
//! operations an interactive front end needs.

use std::path::Path;
use story_graph::{Choice, Connection, NodeStore};
use tracing::info;

use crate::codec::{load_session, load_story, save_session};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::Session;

/// A story and the player's progress through it.
#[derive(Debug, Clone)]
pub struct Game {
    store: NodeStore,
    session: Session,
    config: EngineConfig,
}

impl Game {
    /// Begin playing a story at the configured entry node.
    pub fn new(store: NodeStore, config: EngineConfig) -> Self {
        let session = Session::begin(&config);
        Self {
            store,
            session,
            config,
        }
    }

    /// Load a story file and begin playing it.
    pub fn load(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self, EngineError> {
        let store = load_story(path)?;
        info!(nodes = store.len(), entry = %config.entry_node, "starting story");
        Ok(Self::new(store, config))
    }

    /// The story being played.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// The player's progress.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the player's progress, for inventory, flags and stats.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Show the current node. `None` if the session has not started.
    pub fn current_content(&mut self) -> Result<Option<&str>, EngineError> {
        Ok(self.session.current_content(&self.store)?)
    }

    /// Choices available at the current node.
    pub fn current_choices(&self) -> Result<&[Choice], EngineError> {
        Ok(self.session.current_choices(&self.store)?)
    }

    /// Follow a choice. `Ok(false)` means the selection was not valid.
    pub fn make_choice(&mut self, index: usize) -> Result<bool, EngineError> {
        Ok(self.session.make_choice(&self.store, index)?)
    }

    /// Outgoing connections of the current node.
    pub fn connections(&self) -> Result<Vec<Connection>, EngineError> {
        Ok(self.session.connections(&self.store)?)
    }

    /// Save the player's progress.
    pub fn save_game(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        save_session(path, &self.session, self.config.pretty)
    }

    /// Replace the player's progress with a saved session.
    pub fn load_game(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        self.session = load_session(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::save_story;
    use story_graph::NodeId;
    use tempfile::TempDir;

    fn two_room_game() -> Game {
        let mut store = NodeStore::new();
        store
            .add_node("start", "S", vec![Choice::new("go", "room2")])
            .unwrap();
        store.add_node("room2", "R", vec![]).unwrap();
        Game::new(store, EngineConfig::default())
    }

    #[test]
    fn test_unstarted_game() {
        let mut store = NodeStore::new();
        store.add_node("start", "S", vec![]).unwrap();
        let mut game = Game::new(store, EngineConfig::default().with_entry_node("start"));
        *game.session_mut() = Session::new();

        assert_eq!(game.current_content().unwrap(), None);
        assert!(game.current_choices().unwrap().is_empty());
        assert!(!game.make_choice(0).unwrap());
    }

    #[test]
    fn test_play_to_dead_end() {
        let mut game = two_room_game();

        assert_eq!(game.session().current().unwrap(), "start");
        assert_eq!(game.current_content().unwrap(), Some("S"));
        assert_eq!(game.current_choices().unwrap(), &[Choice::new("go", "room2")]);

        assert!(game.make_choice(0).unwrap());
        assert_eq!(game.session().current().unwrap(), "room2");
        assert_eq!(game.current_content().unwrap(), Some("R"));
        assert!(game.current_choices().unwrap().is_empty());
        assert!(game.connections().unwrap().is_empty());

        assert!(!game.make_choice(0).unwrap());
        assert_eq!(game.session().current().unwrap(), "room2");
    }

    #[test]
    fn test_save_and_restore_progress() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let save_path = dir.path().join("save_game.json");

        let mut game = two_room_game();
        game.current_content().unwrap();
        game.make_choice(0).unwrap();
        game.session_mut().add_item("lantern");
        game.save_game(&save_path).unwrap();

        let mut fresh = two_room_game();
        assert_eq!(fresh.session().current().unwrap(), "start");

        fresh.load_game(&save_path).unwrap();
        assert_eq!(fresh.session(), game.session());
        assert_eq!(fresh.session().current(), Some(&NodeId::from("room2")));
        assert!(fresh.session().has_item("lantern"));
        assert_eq!(fresh.current_content().unwrap(), Some("R"));
    }

    #[test]
    fn test_failed_load_keeps_progress() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut game = two_room_game();
        game.make_choice(0).unwrap();

        let err = game.load_game(dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(game.session().current().unwrap(), "room2");
    }

    #[test]
    fn test_load_story_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let story_path = dir.path().join("story.json");
        save_story(&story_path, two_room_game().store(), true).unwrap();

        let config = EngineConfig::default().with_entry_node("room2");
        let mut game = Game::load(&story_path, config).unwrap();
        assert_eq!(game.current_content().unwrap(), Some("R"));
    }

    #[test]
    fn test_dangling_step_surfaces_not_found() {
        let mut store = NodeStore::new();
        store
            .add_node("start", "S", vec![Choice::new("fall", "pit")])
            .unwrap();
        let mut game = Game::new(store, EngineConfig::default());

        assert!(game.make_choice(0).unwrap());
        let err = game.current_content().unwrap_err();
        assert!(err.is_not_found());
        assert!(!matches!(err, EngineError::FileNotFound(_)));
    }
}

//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use story_graph::NodeId;

use crate::error::EngineError;

/// Configuration shared by play, authoring and persistence.
///
/// Loaded from TOML; every key is optional:
///
/// ```toml
/// entry_node = "start"
/// pretty = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Node a new session begins at. Exempt from the orphan check.
    pub entry_node: NodeId,

    /// Write indented JSON.
    pub pretty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entry_node: NodeId::from("start"),
            pretty: true,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(input)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = crate::codec::read_file(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Use a different entry node.
    pub fn with_entry_node(mut self, entry: impl Into<NodeId>) -> Self {
        self.entry_node = entry.into();
        self
    }

    /// Toggle indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.entry_node, "start");
        assert!(config.pretty);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = EngineConfig::from_toml_str("entry_node = \"prologue\"").unwrap();
        assert_eq!(config.entry_node, "prologue");
        assert!(config.pretty);

        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml_str("pretty = \"yes\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "entry_node = \"gate\"\npretty = false\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config, EngineConfig::default().with_entry_node("gate").with_pretty(false));

        let missing = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(missing.is_not_found());
    }
}

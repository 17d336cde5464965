//! Engine error type.

use std::path::PathBuf;
use story_graph::StoreError;
use thiserror::Error;

/// Errors from loading, saving, configuring and playing stories.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("format error: {0}")]
    Format(String),

    #[error("malformed field: missing '{0}'")]
    MalformedField(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no file path given and none remembered")]
    MissingPath,
}

impl EngineError {
    /// Whether this is a NotFound condition, either a missing file or a
    /// missing node.
    pub fn is_not_found(&self) -> bool {
        match self {
            EngineError::FileNotFound(_) => true,
            EngineError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Format(err.to_string())
    }
}

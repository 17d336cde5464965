//! Codec - JSON persistence for story definitions and session saves.
//!
//! File access is scoped and all-or-nothing: reads load the full payload
//! before decoding, writes go to a temporary file in the same directory which
//! is renamed over the destination only once fully written.

mod save;
mod story;

pub use save::*;
pub use story::*;

use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::EngineError;

/// Read a whole file, mapping a missing file to [`EngineError::FileNotFound`].
pub(crate) fn read_file(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => EngineError::FileNotFound(path.to_path_buf()),
        _ => EngineError::Io(err),
    })
}

/// Replace a file's contents atomically.
///
/// The payload goes to a uniquely named temporary file in the destination's
/// directory, which is then renamed over the destination. On failure the
/// temporary file is removed and the destination is left as it was.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), EngineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;

    Ok(())
}

pub(crate) fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, EngineError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

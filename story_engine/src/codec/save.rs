//! Session-save surface.
//!
//! ```json
//! {
//!   "current_node": "start",
//!   "story_state": {"inventory": [], "visited_nodes": [], "player_stats": {}, "flags": {}},
//!   "history": []
//! }
//! ```

use std::path::Path;
use tracing::{debug, info};

use super::{read_file, to_json, write_file};
use crate::error::EngineError;
use crate::session::Session;

/// Decode a session save.
///
/// Saves written before history was tracked have no `history` key; it
/// defaults to empty. An oversized history keeps its newest entries and
/// repeated `visited_nodes` keep their first occurrence. Anything unparsable
/// is a `Format` error.
pub fn decode_session(input: &str) -> Result<Session, EngineError> {
    let mut session: Session = serde_json::from_str(input)?;
    session.normalize();
    Ok(session)
}

/// Encode a session save.
///
/// Fails with `Format` if a stat or float flag is NaN or infinite, since the
/// result could not be read back.
pub fn encode_session(session: &Session, pretty: bool) -> Result<String, EngineError> {
    if let Some(name) = session.state.non_finite() {
        return Err(EngineError::Format(format!("'{name}' is not a finite number")));
    }
    to_json(session, pretty)
}

/// Load a session save from a file.
pub fn load_session(path: impl AsRef<Path>) -> Result<Session, EngineError> {
    let path = path.as_ref();
    let session = decode_session(&read_file(path)?)?;
    debug!(
        path = %path.display(),
        current = ?session.current(),
        "loaded session"
    );
    Ok(session)
}

/// Save a session to a file.
pub fn save_session(path: impl AsRef<Path>, session: &Session, pretty: bool) -> Result<(), EngineError> {
    let path = path.as_ref();
    write_file(path, &encode_session(session, pretty)?)?;
    info!(path = %path.display(), "saved session");
    Ok(())
}

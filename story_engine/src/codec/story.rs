//! Story-definition surface.
//!
//! ```json
//! {"nodes": [{"id": "start", "content": "...", "choices": [{"text": "...", "next_node": "..."}]}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use story_graph::{Choice, NodeStore, StoryNode};
use tracing::{debug, info};

use super::{read_file, to_json, write_file};
use crate::error::EngineError;

// Decoding goes through raw structs with optional fields so a missing key
// can be reported by name instead of as a generic parse failure.

#[derive(Debug, Deserialize)]
struct RawStory {
    nodes: Option<Vec<RawNode>>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<String>,
    content: Option<String>,
    choices: Option<Vec<RawChoice>>,
}

#[derive(Debug, Deserialize)]
struct RawChoice {
    text: Option<String>,
    next_node: Option<String>,
}

#[derive(Serialize)]
struct StoryFile<'a> {
    nodes: Vec<&'a StoryNode>,
}

fn required<T>(value: Option<T>, key: &str) -> Result<T, EngineError> {
    value.ok_or_else(|| EngineError::MalformedField(key.to_string()))
}

/// Decode a story definition.
///
/// Fails with `Format` if the payload is not JSON of the expected shape or
/// lacks `nodes`, `MalformedField` if a node lacks `id`, `content` or
/// `choices` (or a choice lacks `text` or `next_node`), and `DuplicateId`
/// if two nodes share an id.
pub fn decode_story(input: &str) -> Result<NodeStore, EngineError> {
    let raw: RawStory = serde_json::from_str(input)?;
    let nodes = raw
        .nodes
        .ok_or_else(|| EngineError::Format("missing top-level 'nodes'".to_string()))?;

    let mut store = NodeStore::new();
    for raw_node in nodes {
        let id = required(raw_node.id, "id")?;
        let content = required(raw_node.content, "content")?;
        let choices = required(raw_node.choices, "choices")?
            .into_iter()
            .map(|c| -> Result<Choice, EngineError> {
                Ok(Choice::new(
                    required(c.text, "text")?,
                    required(c.next_node, "next_node")?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        store.add_node(id, content, choices)?;
    }

    Ok(store)
}

/// Encode a story definition, keeping node and choice order.
pub fn encode_story(store: &NodeStore, pretty: bool) -> Result<String, EngineError> {
    to_json(
        &StoryFile {
            nodes: store.nodes().collect(),
        },
        pretty,
    )
}

/// Load a story definition from a file.
pub fn load_story(path: impl AsRef<Path>) -> Result<NodeStore, EngineError> {
    let path = path.as_ref();
    let store = decode_story(&read_file(path)?)?;
    debug!(path = %path.display(), nodes = store.len(), "loaded story");
    Ok(store)
}

/// Save a story definition to a file.
pub fn save_story(path: impl AsRef<Path>, store: &NodeStore, pretty: bool) -> Result<(), EngineError> {
    let path = path.as_ref();
    write_file(path, &encode_story(store, pretty)?)?;
    info!(path = %path.display(), nodes = store.len(), "saved story");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::StoreError;
    use tempfile::TempDir;

    const STORY: &str = r#"{
        "nodes": [
            {
                "id": "start",
                "content": "You wake up in a strange room.",
                "choices": [
                    {"text": "Read the letter", "next_node": "read_letter"},
                    {"text": "Search the room", "next_node": "check_room"}
                ]
            },
            {
                "id": "read_letter",
                "content": "The letter asks you to hurry to the village.",
                "choices": [{"text": "Leave", "next_node": "leave_room"}]
            },
            {"id": "leave_room", "content": "You step into the inn.", "choices": []}
        ]
    }"#;

    #[test]
    fn test_decode_story() {
        let store = decode_story(STORY).unwrap();

        assert_eq!(store.len(), 3);
        let ids: Vec<_> = store.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["start", "read_letter", "leave_room"]);

        let start = store.get_node("start").unwrap();
        assert_eq!(start.choices[1], Choice::new("Search the room", "check_room"));
    }

    #[test]
    fn test_missing_nodes_is_format_error() {
        let err = decode_story(r#"{"scenes": []}"#).unwrap_err();
        assert!(matches!(err, EngineError::Format(_)));
    }

    #[test]
    fn test_unparsable_is_format_error() {
        assert!(matches!(decode_story("{not json"), Err(EngineError::Format(_))));
        assert!(matches!(decode_story("[1, 2]"), Err(EngineError::Format(_))));
        assert!(matches!(
            decode_story(r#"{"nodes": [{"id": 7, "content": "x", "choices": []}]}"#),
            Err(EngineError::Format(_))
        ));
    }

    #[test]
    fn test_missing_node_fields_are_named() {
        let cases = [
            (r#"{"nodes": [{"content": "x", "choices": []}]}"#, "id"),
            (r#"{"nodes": [{"id": "a", "choices": []}]}"#, "content"),
            (r#"{"nodes": [{"id": "a", "content": "x"}]}"#, "choices"),
            (
                r#"{"nodes": [{"id": "a", "content": "x", "choices": [{"text": "go"}]}]}"#,
                "next_node",
            ),
            (
                r#"{"nodes": [{"id": "a", "content": "x", "choices": [{"next_node": "b"}]}]}"#,
                "text",
            ),
        ];

        for (input, key) in cases {
            match decode_story(input) {
                Err(EngineError::MalformedField(field)) => assert_eq!(field, key),
                other => panic!("expected MalformedField({key}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let input = r#"{"nodes": [
            {"id": "a", "content": "x", "choices": []},
            {"id": "a", "content": "y", "choices": []}
        ]}"#;

        match decode_story(input) {
            Err(EngineError::Store(StoreError::DuplicateId(id))) => assert_eq!(id, "a"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_emits_every_field() {
        let mut store = NodeStore::new();
        store.add_node("end", "The end.", vec![]).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&encode_story(&store, false).unwrap()).unwrap();
        assert_eq!(json["nodes"][0]["id"], "end");
        assert_eq!(json["nodes"][0]["content"], "The end.");
        assert!(json["nodes"][0]["choices"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut store = NodeStore::new();
        store
            .add_node(
                "z",
                "Last letter first.",
                vec![
                    Choice::new("to a", "a"),
                    Choice::new("to a again", "a"),
                    Choice::new("nowhere", "void"),
                ],
            )
            .unwrap();
        store.add_node("a", "Naïve café ☕", vec![Choice::new("back", "z")]).unwrap();

        for pretty in [true, false] {
            let decoded = decode_story(&encode_story(&store, pretty).unwrap()).unwrap();
            let original: Vec<_> = store.nodes().cloned().collect();
            let restored: Vec<_> = decoded.nodes().cloned().collect();
            assert_eq!(original, restored);
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("story.json");

        let store = decode_story(STORY).unwrap();
        save_story(&path, &store, true).unwrap();
        let loaded = load_story(&path).unwrap();

        assert_eq!(loaded.len(), store.len());
        assert_eq!(
            loaded.get_node("start").unwrap(),
            store.get_node("start").unwrap()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = load_story(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, EngineError::FileNotFound(_)));
    }
}

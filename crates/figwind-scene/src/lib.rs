//! Figwind scene model
//!
//! Deserializes the raw scene-graph JSON posted by the plugin host and
//! normalizes it into a plain, owned [`types::SceneNode`] tree with value
//! semantics — no host-runtime references survive past this crate.
//! Also home to the small geometry helpers the rest of the pipeline uses.
//!
//! ```text
//! scene JSON → parse_scene() → Vec<RawNode> → convert_nodes() → Vec<SceneNode>
//! ```

pub mod convert;
pub mod geometry;
pub mod raw;
pub mod types;

pub use convert::convert_nodes;
pub use raw::RawNode;
pub use types::{NodeKind, SceneNode, Value};

/// Scene input error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Scene error at line {line}, column {column}: {message}")]
pub struct SceneError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Parse a scene document (a JSON array of raw nodes) into raw node values.
pub fn parse_scene(json: &str) -> Result<Vec<RawNode>, SceneError> {
    serde_json::from_str(json).map_err(|e| SceneError {
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_scene() {
        let nodes = parse_scene("[]").unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_parse_error_has_position() {
        let err = parse_scene("[{").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.column > 0);
    }

    #[test]
    fn test_parse_minimal_node() {
        let nodes = parse_scene(
            r#"[{"type": "RECTANGLE", "id": "1:1", "name": "Rect", "width": 10, "height": 10}]"#,
        )
        .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, "RECTANGLE");
    }
}

//! Figwind layout passes
//!
//! Rewrites the normalized scene tree so the emitter only ever sees frames:
//! single-child groups collapse, surviving groups become frames with rebased
//! coordinates, rectangles that visually contain siblings are promoted into
//! container frames, and every flat container gets a flex layout inferred
//! from its children's geometry (or is flagged `is_relative` when none fits).
//!
//! Passes consume and return owned trees; nothing upstream is mutated.
//!
//! ```text
//! Vec<SceneNode> → restructure() → rewritten, layout-annotated Vec<SceneNode>
//! ```

pub mod infer;
pub mod structure;

use figwind_scene::types::NodeKind;
use figwind_scene::SceneNode;

/// Structural rewriting error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Layout error: {message}")]
pub struct LayoutError {
    pub message: String,
}

/// Run the structural normalizer and auto-layout inference over a forest of
/// root nodes, bottom-up.
pub fn restructure(nodes: Vec<SceneNode>) -> Result<Vec<SceneNode>, LayoutError> {
    nodes.into_iter().map(process_node).collect()
}

fn process_node(mut node: SceneNode) -> Result<SceneNode, LayoutError> {
    // Children first, so groups arriving here are already flattened inside.
    if let Some(container) = node.container_mut() {
        let children = std::mem::take(&mut container.children);
        container.children = children
            .into_iter()
            .map(process_node)
            .collect::<Result<_, _>>()?;
    }

    if let NodeKind::Group(_) = node.kind {
        // A visible group with exactly one child disappears entirely.
        if node.visible {
            let container = node.container_mut().expect("group is a container");
            if container.children.len() == 1 {
                return Ok(container.children.pop().expect("length checked"));
            }
        }
        structure::group_to_frame(&mut node);
    }

    if node.container().is_some() {
        structure::promote_contained_rectangles(&mut node)?;
        infer::convert_to_auto_layout(&mut node);
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figwind_scene::types::{ContainerProps, LayoutBlock, NodeKind, ShapeStyle};

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> SceneNode {
        SceneNode {
            id: id.into(),
            name: format!("rect-{id}"),
            visible: true,
            locked: false,
            layout: LayoutBlock {
                x,
                y,
                width: w,
                height: h,
                ..LayoutBlock::default()
            },
            blend: Default::default(),
            layout_align: Default::default(),
            layout_grow: 0.0,
            kind: NodeKind::Rectangle(ShapeStyle::default()),
        }
    }

    fn group(id: &str, x: f64, y: f64, w: f64, h: f64, children: Vec<SceneNode>) -> SceneNode {
        SceneNode {
            id: id.into(),
            name: format!("group-{id}"),
            visible: true,
            locked: false,
            layout: LayoutBlock {
                x,
                y,
                width: w,
                height: h,
                ..LayoutBlock::default()
            },
            blend: Default::default(),
            layout_align: Default::default(),
            layout_grow: 0.0,
            kind: NodeKind::Group(ContainerProps {
                children,
                ..ContainerProps::default()
            }),
        }
    }

    // =========================================================================
    // Group flattening
    // =========================================================================

    #[test]
    fn test_single_child_group_collapses() {
        let tree = vec![group("g", 0.0, 0.0, 50.0, 50.0, vec![rect("r", 5.0, 5.0, 10.0, 10.0)])];
        let out = restructure(tree).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].is_rectangle());
        assert_eq!(out[0].id, "r");
    }

    #[test]
    fn test_hidden_group_survives() {
        let mut g = group("g", 0.0, 0.0, 50.0, 50.0, vec![rect("r", 5.0, 5.0, 10.0, 10.0)]);
        g.visible = false;
        let out = restructure(vec![g]).unwrap();
        // Not collapsed; converted to a frame instead.
        assert!(matches!(out[0].kind, NodeKind::Frame(_)));
    }

    #[test]
    fn test_group_becomes_frame_with_rebased_children() {
        let tree = vec![group(
            "g",
            250.0,
            250.0,
            100.0,
            100.0,
            vec![
                rect("a", 260.0, 260.0, 10.0, 10.0),
                rect("b", 260.0, 290.0, 10.0, 10.0),
            ],
        )];
        let out = restructure(tree).unwrap();
        assert!(matches!(out[0].kind, NodeKind::Frame(_)));
        let children = &out[0].container().unwrap().children;
        assert_eq!((children[0].layout.x, children[0].layout.y), (10.0, 10.0));
    }

    // =========================================================================
    // Idempotence
    // =========================================================================

    #[test]
    fn test_restructure_is_idempotent() {
        let tree = vec![group(
            "g",
            0.0,
            0.0,
            100.0,
            100.0,
            vec![
                rect("a", 0.0, 0.0, 100.0, 10.0),
                rect("b", 0.0, 20.0, 100.0, 10.0),
            ],
        )];
        let once = restructure(tree).unwrap();
        let twice = restructure(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}

//! Structural normalizer: group→frame conversion and rectangle-as-container
//! promotion.

use figwind_scene::types::{BlendBlock, ContainerProps, NodeKind, SceneNode, ShapeStyle};

use crate::{infer, LayoutError};

/// Convert a surviving group into a frame.
///
/// Group children are positioned in the group's parent's space, so each
/// direct child is rebased by subtracting the group's own origin. Inner
/// groups were already converted (the walk is bottom-up), which is what
/// keeps this single-level subtraction correct.
pub fn group_to_frame(node: &mut SceneNode) {
    let NodeKind::Group(container) = &mut node.kind else {
        return;
    };

    let (gx, gy) = (node.layout.x, node.layout.y);
    let mut props = std::mem::take(container);
    for child in &mut props.children {
        child.layout.x -= gx;
        child.layout.y -= gy;
    }
    node.kind = NodeKind::Frame(props);
}

/// Full containment: `a` covers `b` on all four edges.
fn contains(a: &SceneNode, b: &SceneNode) -> bool {
    a.layout.x <= b.layout.x
        && a.layout.y <= b.layout.y
        && a.layout.x + a.layout.width >= b.layout.x + b.layout.width
        && a.layout.y + a.layout.height >= b.layout.y + b.layout.height
}

/// Promote rectangles that visually contain sibling nodes into frames that
/// structurally contain them.
///
/// The scan is a plain double loop over the container's direct children in
/// layer order: an earlier rectangle claims later siblings it fully covers,
/// and a claimed child never moves again (first match wins). Sibling counts
/// are small, so O(n²) is fine here. Each claiming rectangle becomes a frame
/// spliced back at its original index, with its new children rebased to the
/// frame origin and its paint transferred only when the rectangle was
/// visible.
pub fn promote_contained_rectangles(node: &mut SceneNode) -> Result<(), LayoutError> {
    let Some(container) = node.container_mut() else {
        return Ok(());
    };
    let n = container.children.len();
    if n < 2 {
        return Ok(());
    }

    let children = &container.children;
    let mut claimed_by: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        if !children[i].is_rectangle() || claimed_by[i].is_some() {
            continue;
        }
        for j in (i + 1)..n {
            if claimed_by[j].is_some() || !contains(&children[i], &children[j]) {
                continue;
            }
            if children[i].id.is_empty() {
                // Every node must carry an id by this stage; claims are
                // keyed by it.
                return Err(LayoutError {
                    message: format!(
                        "node \"{}\" reached container promotion without an id",
                        children[i].name
                    ),
                });
            }
            claimed_by[j] = Some(i);
        }
    }

    if claimed_by.iter().all(Option::is_none) {
        return Ok(());
    }

    let old = std::mem::take(&mut container.children);
    let mut slots: Vec<Option<SceneNode>> = old.into_iter().map(Some).collect();
    let mut rebuilt = Vec::with_capacity(n);

    for i in 0..n {
        if claimed_by[i].is_some() {
            continue;
        }
        let child = slots[i].take().expect("each slot is taken once");
        let claims: Vec<usize> = (0..n).filter(|&j| claimed_by[j] == Some(i)).collect();
        if claims.is_empty() {
            rebuilt.push(child);
            continue;
        }

        let mut frame = rectangle_into_frame(child);
        for j in claims {
            let mut claimed = slots[j].take().expect("each slot is taken once");
            claimed.layout.x -= frame.layout.x;
            claimed.layout.y -= frame.layout.y;
            frame
                .container_mut()
                .expect("frame is a container")
                .children
                .push(claimed);
        }
        infer::convert_to_auto_layout(&mut frame);
        rebuilt.push(frame);
    }

    container.children = rebuilt;
    Ok(())
}

fn rectangle_into_frame(node: SceneNode) -> SceneNode {
    let style = match node.kind {
        NodeKind::Rectangle(style) if node.visible => style,
        // Hidden-layer styling must not leak onto the promoted children.
        _ => ShapeStyle::default(),
    };
    let blend = if node.visible {
        node.blend
    } else {
        BlendBlock::default()
    };

    SceneNode {
        id: node.id,
        name: node.name,
        visible: true,
        locked: node.locked,
        layout: node.layout,
        blend,
        layout_align: node.layout_align,
        layout_grow: node.layout_grow,
        kind: NodeKind::Frame(ContainerProps {
            style,
            ..ContainerProps::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figwind_scene::types::{LayoutBlock, Paint, Rgb, Value};

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

    fn frame_with(children: Vec<SceneNode>) -> SceneNode {
        SceneNode {
            id: "frame".into(),
            name: "frame".into(),
            visible: true,
            locked: false,
            layout: LayoutBlock {
                width: 200.0,
                height: 200.0,
                ..LayoutBlock::default()
            },
            blend: Default::default(),
            layout_align: Default::default(),
            layout_grow: 0.0,
            kind: NodeKind::Frame(ContainerProps {
                children,
                ..ContainerProps::default()
            }),
        }
    }

    // =========================================================================
    // Containment promotion
    // =========================================================================

    #[test]
    fn test_contained_rectangle_reparents() {
        let mut parent = frame_with(vec![
            rect("a", 0.0, 0.0, 100.0, 100.0),
            rect("b", 10.0, 10.0, 20.0, 20.0),
        ]);
        promote_contained_rectangles(&mut parent).unwrap();

        let children = &parent.container().unwrap().children;
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0].kind, NodeKind::Frame(_)));
        assert_eq!(children[0].id, "a");

        let inner = &children[0].container().unwrap().children;
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].id, "b");
        assert_eq!((inner[0].layout.x, inner[0].layout.y), (10.0, 10.0));
    }

    #[test]
    fn test_first_rectangle_claims() {
        // Both a and c contain b; a comes first in layer order and wins.
        let mut parent = frame_with(vec![
            rect("a", 0.0, 0.0, 100.0, 100.0),
            rect("b", 10.0, 10.0, 20.0, 20.0),
            rect("c", 0.0, 0.0, 150.0, 150.0),
        ]);
        promote_contained_rectangles(&mut parent).unwrap();

        let children = &parent.container().unwrap().children;
        // a became a frame holding b; c does not fit inside a and keeps
        // its place as a sibling.
        assert_eq!(children[0].id, "a");
        assert_eq!(children[0].container().unwrap().children[0].id, "b");
        assert_eq!(children[1].id, "c");
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let mut parent = frame_with(vec![
            rect("", 0.0, 0.0, 100.0, 100.0),
            rect("b", 10.0, 10.0, 20.0, 20.0),
        ]);
        let err = promote_contained_rectangles(&mut parent).unwrap_err();
        assert!(err.message.contains("without an id"));
    }

    #[test]
    fn test_hidden_rectangle_styling_not_transferred() {
        let mut a = rect("a", 0.0, 0.0, 100.0, 100.0);
        a.visible = false;
        if let NodeKind::Rectangle(style) = &mut a.kind {
            style.fills = Value::Definite(vec![Paint::Solid {
                color: Rgb { r: 1.0, g: 0.0, b: 0.0 },
                opacity: 1.0,
                visible: true,
            }]);
        }
        let mut parent = frame_with(vec![a, rect("b", 10.0, 10.0, 20.0, 20.0)]);
        promote_contained_rectangles(&mut parent).unwrap();

        let frame = &parent.container().unwrap().children[0];
        let fills = frame.container().unwrap().style.fills.as_definite().unwrap();
        assert!(fills.is_empty());
    }

    #[test]
    fn test_no_containment_is_noop() {
        let mut parent = frame_with(vec![
            rect("a", 0.0, 0.0, 50.0, 50.0),
            rect("b", 60.0, 0.0, 50.0, 50.0),
        ]);
        let before = parent.clone();
        promote_contained_rectangles(&mut parent).unwrap();
        assert_eq!(parent, before);
    }

    // =========================================================================
    // Group→frame rebase
    // =========================================================================

    #[test]
    fn test_group_rebase() {
        let mut node = SceneNode {
            kind: NodeKind::Group(ContainerProps {
                children: vec![rect("r", 260.0, 260.0, 10.0, 10.0)],
                ..ContainerProps::default()
            }),
            ..rect("g", 250.0, 250.0, 100.0, 100.0)
        };
        group_to_frame(&mut node);
        assert!(matches!(node.kind, NodeKind::Frame(_)));
        let child = &node.container().unwrap().children[0];
        assert_eq!((child.layout.x, child.layout.y), (10.0, 10.0));
    }
}

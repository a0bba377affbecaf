//! Per-node class builders: sizing, positioning, padding, borders, corner
//! radius, and blend attributes. Every builder is a pure function of the
//! node plus explicit parent context.

use figwind_scene::types::{
    CornerRadius, LayoutAlign, LayoutMode, Padding, SceneNode, Value,
};

use crate::color::border_color_class;
use crate::tables::{
    border_width_class, fmt_px, opacity_class, px_to_border_radius, px_to_layout_size,
    rotation_classes, FRACTIONS, FRACTION_TOLERANCE, SPACING_CEILING_PX,
};

/// Parent context threaded through the emitter. Children never hold a
/// reference to their parent, so the few attributes the builders need are
/// copied out here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentInfo {
    pub id: String,
    pub layout_mode: LayoutMode,
    pub is_relative: bool,
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

/// Resolved size along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisSize {
    /// Concrete pixel value, still unsnapped.
    Px(f64),
    /// Fills the parent along this axis.
    Full,
    /// Responsive fraction token of the parent content box.
    Fraction(&'static str),
    /// Content-determined; emit nothing.
    Omit,
}

/// Decide the effective (width, height) of a node, in priority order:
/// stretch+grow, stretch, grow, AUTO-axis omission, responsive fraction,
/// concrete pixels.
pub fn node_size(node: &SceneNode, parent: Option<&ParentInfo>) -> (AxisSize, AxisSize) {
    let in_auto_layout = parent.is_some_and(|p| p.layout_mode != LayoutMode::None);

    if in_auto_layout {
        let stretches = node.layout_align == LayoutAlign::Stretch;
        let grows = node.layout_grow == 1.0;
        if stretches && grows {
            return (AxisSize::Full, AxisSize::Full);
        }
        let parent_mode = parent.map(|p| p.layout_mode).unwrap_or_default();
        if stretches {
            return match parent_mode {
                LayoutMode::Horizontal => (pixel_or_fraction_w(node, parent), AxisSize::Full),
                _ => (AxisSize::Full, pixel_or_fraction_h(node, parent)),
            };
        }
        if grows {
            return match parent_mode {
                LayoutMode::Horizontal => (AxisSize::Full, pixel_or_fraction_h(node, parent)),
                _ => (pixel_or_fraction_w(node, parent), AxisSize::Full),
            };
        }
    }

    (pixel_or_fraction_w(node, parent), pixel_or_fraction_h(node, parent))
}

fn pixel_or_fraction_w(node: &SceneNode, parent: Option<&ParentInfo>) -> AxisSize {
    if auto_sized_axis(node, true) {
        return AxisSize::Omit;
    }
    if let Some(parent) = parent.filter(|p| !p.is_relative) {
        let content = parent.width - parent.padding.left - parent.padding.right;
        if let Some(fraction) = match_fraction(node.layout.width, content) {
            return fraction;
        }
    }
    AxisSize::Px(node.layout.width)
}

fn pixel_or_fraction_h(node: &SceneNode, parent: Option<&ParentInfo>) -> AxisSize {
    if auto_sized_axis(node, false) {
        return AxisSize::Omit;
    }
    if let Some(parent) = parent.filter(|p| !p.is_relative) {
        let content = parent.height - parent.padding.top - parent.padding.bottom;
        if let Some(fraction) = match_fraction(node.layout.height, content) {
            return fraction;
        }
    }
    AxisSize::Px(node.layout.height)
}

/// A container whose sizing mode on an axis is AUTO lets content decide.
fn auto_sized_axis(node: &SceneNode, horizontal: bool) -> bool {
    use figwind_scene::types::SizingMode;
    let Some(container) = node.container() else {
        return false;
    };
    let auto_primary = container.primary_axis_sizing_mode == SizingMode::Auto;
    let auto_counter = container.counter_axis_sizing_mode == SizingMode::Auto;
    match container.layout_mode {
        LayoutMode::Horizontal => {
            if horizontal {
                auto_primary
            } else {
                auto_counter
            }
        }
        LayoutMode::Vertical => {
            if horizontal {
                auto_counter
            } else {
                auto_primary
            }
        }
        LayoutMode::None => false,
    }
}

fn match_fraction(size: f64, content: f64) -> Option<AxisSize> {
    if content <= 0.0 {
        return None;
    }
    let ratio = size / content;
    for (fraction, token) in FRACTIONS {
        if (ratio - fraction).abs() < FRACTION_TOLERANCE {
            return Some(if *fraction == 1.0 {
                AxisSize::Full
            } else {
                AxisSize::Fraction(token)
            });
        }
    }
    None
}

/// Render the resolved size as class tokens plus an optional inline-style
/// fragment for sizes past the spacing-scale ceiling.
pub fn size_classes(
    node: &SceneNode,
    parent: Option<&ParentInfo>,
) -> (Vec<String>, Vec<String>) {
    let (width, height) = node_size(node, parent);
    let parent_mode = parent.map(|p| p.layout_mode).unwrap_or_default();

    let mut classes = Vec::new();
    let mut styles = Vec::new();
    push_axis(width, Axis::Width, parent_mode, &mut classes, &mut styles);
    push_axis(height, Axis::Height, parent_mode, &mut classes, &mut styles);
    (classes, styles)
}

/// Width tokens only, for nodes whose height tracks their content.
pub fn width_classes(
    node: &SceneNode,
    parent: Option<&ParentInfo>,
) -> (Vec<String>, Vec<String>) {
    let (width, _) = node_size(node, parent);
    let parent_mode = parent.map(|p| p.layout_mode).unwrap_or_default();

    let mut classes = Vec::new();
    let mut styles = Vec::new();
    push_axis(width, Axis::Width, parent_mode, &mut classes, &mut styles);
    (classes, styles)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
}

fn push_axis(
    size: AxisSize,
    axis: Axis,
    parent_mode: LayoutMode,
    classes: &mut Vec<String>,
    styles: &mut Vec<String>,
) {
    let (prefix, property, flex_mode) = match axis {
        Axis::Width => ("w", "width", LayoutMode::Horizontal),
        Axis::Height => ("h", "height", LayoutMode::Vertical),
    };
    match size {
        AxisSize::Px(px) if px > SPACING_CEILING_PX => {
            styles.push(format!("{property}: {}px", fmt_px(px)));
        }
        AxisSize::Px(px) => classes.push(format!("{prefix}-{}", px_to_layout_size(px))),
        // Full along the parent's primary axis participates in the flex
        // distribution instead of claiming a literal 100%.
        AxisSize::Full if parent_mode == flex_mode => classes.push("flex-1".into()),
        AxisSize::Full => classes.push(format!("{prefix}-full")),
        AxisSize::Fraction(token) => classes.push(format!("{prefix}-{token}")),
        AxisSize::Omit => {}
    }
}

// ---------------------------------------------------------------------------
// Positioning inside relative containers
// ---------------------------------------------------------------------------

/// Where a child of a relative container ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// Fills the parent (or parent is not relative); no position output.
    Static,
    /// Snapped to an anchor expressible in utility classes.
    Classes(Vec<String>),
    /// Arbitrary placement; explicit pixel offsets.
    Inline { left: f64, top: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Center,
    End,
}

const ANCHOR_THRESHOLD: f64 = 4.0;

/// Position a child inside a relative container.
pub fn position(node: &SceneNode, parent: Option<&ParentInfo>) -> Position {
    let Some(parent) = parent.filter(|p| p.is_relative) else {
        return Position::Static;
    };

    let layout = &node.layout;
    // Small nodes get a tight tolerance so they are not mistaken for
    // full-bleed fills.
    let tolerance = if layout.width < 16.0 || layout.height < 16.0 {
        1.0
    } else {
        8.0
    };
    let fills_parent = (layout.x - parent.padding.left).abs() <= tolerance
        && (layout.y - parent.padding.top).abs() <= tolerance
        && (layout.x + layout.width - (parent.width - parent.padding.right)).abs() <= tolerance
        && (layout.y + layout.height - (parent.height - parent.padding.bottom)).abs() <= tolerance;
    if fills_parent {
        return Position::Static;
    }

    let horizontal = classify_anchor(layout.x, layout.width, parent.width);
    let vertical = classify_anchor(layout.y, layout.height, parent.height);
    let (Some(horizontal), Some(vertical)) = (horizontal, vertical) else {
        return Position::Inline { left: layout.x, top: layout.y };
    };

    // Auto-margin centering only works when the node has a concrete size on
    // both axes; otherwise escape to explicit offsets.
    let needs_fixed_size =
        horizontal == Anchor::Center || vertical == Anchor::Center;
    if needs_fixed_size && !has_fixed_size(node) {
        return Position::Inline { left: layout.x, top: layout.y };
    }

    let mut classes = vec!["absolute".to_string()];
    match (horizontal, vertical) {
        (Anchor::Center, Anchor::Center) => {
            classes.push("inset-0".into());
            classes.push("m-auto".into());
        }
        (Anchor::Center, v) => {
            classes.push("inset-x-0".into());
            classes.push(vertical_edge(v).into());
            classes.push("mx-auto".into());
        }
        (h, Anchor::Center) => {
            classes.push(horizontal_edge(h).into());
            classes.push("inset-y-0".into());
            classes.push("my-auto".into());
        }
        (h, v) => {
            classes.push(horizontal_edge(h).into());
            classes.push(vertical_edge(v).into());
        }
    }
    Position::Classes(classes)
}

fn classify_anchor(offset: f64, size: f64, parent_size: f64) -> Option<Anchor> {
    // Edges take priority over center classification.
    if offset.abs() <= ANCHOR_THRESHOLD {
        Some(Anchor::Start)
    } else if (parent_size - (offset + size)).abs() <= ANCHOR_THRESHOLD {
        Some(Anchor::End)
    } else if (offset + size / 2.0 - parent_size / 2.0).abs() <= ANCHOR_THRESHOLD {
        Some(Anchor::Center)
    } else {
        None
    }
}

fn horizontal_edge(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Start => "left-0",
        Anchor::End => "right-0",
        Anchor::Center => unreachable!("center handled by caller"),
    }
}

fn vertical_edge(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Start => "top-0",
        Anchor::End => "bottom-0",
        Anchor::Center => unreachable!("center handled by caller"),
    }
}

fn has_fixed_size(node: &SceneNode) -> bool {
    !auto_sized_axis(node, true) && !auto_sized_axis(node, false)
}

// ---------------------------------------------------------------------------
// Padding, borders, radius, blend
// ---------------------------------------------------------------------------

/// Padding classes: collapsed to `p-*` / `px-*` / `py-*` where sides agree,
/// individual sides otherwise. Zero sides emit nothing.
pub fn padding_classes(padding: &Padding) -> Vec<String> {
    let Padding { left, right, top, bottom } = *padding;
    let mut classes = Vec::new();

    if left == right && right == top && top == bottom {
        if left > 0.0 {
            classes.push(format!("p-{}", px_to_layout_size(left)));
        }
        return classes;
    }

    if left == right {
        if left > 0.0 {
            classes.push(format!("px-{}", px_to_layout_size(left)));
        }
    } else {
        if left > 0.0 {
            classes.push(format!("pl-{}", px_to_layout_size(left)));
        }
        if right > 0.0 {
            classes.push(format!("pr-{}", px_to_layout_size(right)));
        }
    }

    if top == bottom {
        if top > 0.0 {
            classes.push(format!("py-{}", px_to_layout_size(top)));
        }
    } else {
        if top > 0.0 {
            classes.push(format!("pt-{}", px_to_layout_size(top)));
        }
        if bottom > 0.0 {
            classes.push(format!("pb-{}", px_to_layout_size(bottom)));
        }
    }

    classes
}

/// Border width and color from the stroke attributes. No visible stroke or
/// zero weight emits nothing.
pub fn border_classes(style: &figwind_scene::types::ShapeStyle) -> Vec<String> {
    if style.stroke_weight <= 0.0 || !style.strokes.iter().any(|s| s.is_visible()) {
        return Vec::new();
    }
    let mut classes = vec![border_width_class(style.stroke_weight)];
    if let Some(color) = border_color_class(&style.strokes) {
        classes.push(color);
    }
    classes
}

/// Corner radius classes. A mixed radius across a selection emits nothing.
pub fn radius_classes(radius: &Value<CornerRadius>, is_ellipse: bool) -> Vec<String> {
    if is_ellipse {
        return vec!["rounded-full".into()];
    }
    match radius.as_definite() {
        Some(CornerRadius::Uniform(r)) if *r > 0.0 => {
            vec![rounded_token(px_to_border_radius(*r))]
        }
        Some(CornerRadius::PerCorner { top_left, top_right, bottom_right, bottom_left }) => {
            let mut classes = Vec::new();
            for (corner, value) in [
                ("tl", top_left),
                ("tr", top_right),
                ("br", bottom_right),
                ("bl", bottom_left),
            ] {
                if *value > 0.0 {
                    let suffix = px_to_border_radius(*value);
                    if suffix.is_empty() {
                        classes.push(format!("rounded-{corner}"));
                    } else {
                        classes.push(format!("rounded-{corner}-{suffix}"));
                    }
                }
            }
            classes
        }
        _ => Vec::new(),
    }
}

fn rounded_token(suffix: &str) -> String {
    if suffix.is_empty() {
        "rounded".into()
    } else {
        format!("rounded-{suffix}")
    }
}

/// Layer-level blend classes: opacity, blend mode, rotation.
pub fn blend_classes(node: &SceneNode) -> Vec<String> {
    let mut classes = Vec::new();
    if let Some(opacity) = opacity_class(node.blend.opacity) {
        classes.push(opacity);
    }
    if let Some(token) = node.blend.blend_mode.css_token() {
        classes.push(format!("mix-blend-{token}"));
    }
    classes.extend(rotation_classes(node.layout.rotation));
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use figwind_scene::types::{LayoutBlock, NodeKind, ShapeStyle};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> SceneNode {
        SceneNode {
            id: "n".into(),
            name: "node".into(),
            visible: true,
            locked: false,
            layout: LayoutBlock { x, y, width: w, height: h, ..LayoutBlock::default() },
            blend: Default::default(),
            layout_align: Default::default(),
            layout_grow: 0.0,
            kind: NodeKind::Rectangle(ShapeStyle::default()),
        }
    }

    fn parent(mode: LayoutMode, w: f64, h: f64) -> ParentInfo {
        ParentInfo {
            id: "p".into(),
            layout_mode: mode,
            is_relative: false,
            width: w,
            height: h,
            padding: Padding::default(),
        }
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    #[test]
    fn test_half_width_fraction() {
        let node = rect(0.0, 0.0, 200.0, 40.0);
        let p = parent(LayoutMode::Vertical, 400.0, 100.0);
        let (width, _) = node_size(&node, Some(&p));
        assert_eq!(width, AxisSize::Fraction("1/2"));
        let (classes, _) = size_classes(&node, Some(&p));
        assert!(classes.contains(&"w-1/2".to_string()));
    }

    #[test]
    fn test_fraction_skipped_in_relative_parent() {
        let node = rect(0.0, 0.0, 200.0, 40.0);
        let mut p = parent(LayoutMode::None, 400.0, 100.0);
        p.is_relative = true;
        let (width, _) = node_size(&node, Some(&p));
        assert_eq!(width, AxisSize::Px(200.0));
    }

    #[test]
    fn test_stretch_and_grow_fill_both_axes() {
        let mut node = rect(0.0, 0.0, 100.0, 100.0);
        node.layout_align = LayoutAlign::Stretch;
        node.layout_grow = 1.0;
        let p = parent(LayoutMode::Vertical, 100.0, 300.0);
        assert_eq!(node_size(&node, Some(&p)), (AxisSize::Full, AxisSize::Full));
    }

    #[test]
    fn test_grow_fills_primary_axis_as_flex_1() {
        let mut node = rect(0.0, 0.0, 37.0, 40.0);
        node.layout_grow = 1.0;
        let p = parent(LayoutMode::Horizontal, 200.0, 40.0);
        let (classes, _) = size_classes(&node, Some(&p));
        assert!(classes.contains(&"flex-1".to_string()));
    }

    #[test]
    fn test_width_classes_agree_with_full_sizing() {
        let mut node = rect(0.0, 0.0, 37.0, 40.0);
        node.layout_grow = 1.0;
        let p = parent(LayoutMode::Horizontal, 200.0, 40.0);
        let (classes, styles) = width_classes(&node, Some(&p));
        assert_eq!(classes, vec!["flex-1".to_string()]);
        assert!(styles.is_empty());
    }

    #[test]
    fn test_oversize_escapes_to_inline_style() {
        let node = rect(0.0, 0.0, 500.0, 40.0);
        let (classes, styles) = size_classes(&node, None);
        assert!(!classes.iter().any(|c| c.starts_with("w-")));
        assert_eq!(styles, vec!["width: 500px"]);
    }

    #[test]
    fn test_exact_ceiling_still_uses_class() {
        let node = rect(0.0, 0.0, 384.0, 40.0);
        let (classes, styles) = size_classes(&node, None);
        assert!(classes.contains(&"w-96".to_string()));
        assert!(styles.is_empty());
    }

    // =========================================================================
    // Position
    // =========================================================================

    fn relative_parent(w: f64, h: f64) -> ParentInfo {
        ParentInfo {
            id: "p".into(),
            layout_mode: LayoutMode::None,
            is_relative: true,
            width: w,
            height: h,
            padding: Padding::default(),
        }
    }

    #[test]
    fn test_fill_parent_is_static() {
        let node = rect(2.0, -3.0, 98.0, 104.0);
        let p = relative_parent(100.0, 100.0);
        assert_eq!(position(&node, Some(&p)), Position::Static);
    }

    #[test]
    fn test_small_node_tight_tolerance() {
        // 10px tall, offset 2: outside the 1px tolerance, so positioned.
        let node = rect(0.0, 2.0, 100.0, 10.0);
        let p = relative_parent(100.0, 12.0);
        assert_ne!(position(&node, Some(&p)), Position::Static);
    }

    #[test]
    fn test_corner_anchor() {
        let node = rect(0.0, 70.0, 30.0, 30.0);
        let p = relative_parent(100.0, 100.0);
        assert_eq!(
            position(&node, Some(&p)),
            Position::Classes(vec!["absolute".into(), "left-0".into(), "bottom-0".into()])
        );
    }

    #[test]
    fn test_centered_anchor_uses_auto_margins() {
        let node = rect(35.0, 0.0, 30.0, 30.0);
        let p = relative_parent(100.0, 100.0);
        assert_eq!(
            position(&node, Some(&p)),
            Position::Classes(vec![
                "absolute".into(),
                "inset-x-0".into(),
                "top-0".into(),
                "mx-auto".into(),
            ])
        );
    }

    #[test]
    fn test_arbitrary_placement_escapes_to_inline() {
        let node = rect(13.0, 27.0, 30.0, 30.0);
        let p = relative_parent(100.0, 100.0);
        assert_eq!(position(&node, Some(&p)), Position::Inline { left: 13.0, top: 27.0 });
    }

    #[test]
    fn test_non_relative_parent_is_static() {
        let node = rect(13.0, 27.0, 30.0, 30.0);
        let p = parent(LayoutMode::Vertical, 100.0, 100.0);
        assert_eq!(position(&node, Some(&p)), Position::Static);
    }

    // =========================================================================
    // Padding and radius
    // =========================================================================

    #[test]
    fn test_uniform_padding_collapses() {
        let padding = Padding { left: 16.0, right: 16.0, top: 16.0, bottom: 16.0 };
        assert_eq!(padding_classes(&padding), vec!["p-4"]);
    }

    #[test]
    fn test_paired_padding() {
        let padding = Padding { left: 16.0, right: 16.0, top: 8.0, bottom: 8.0 };
        assert_eq!(padding_classes(&padding), vec!["px-4", "py-2"]);
    }

    #[test]
    fn test_zero_padding_is_silent() {
        assert!(padding_classes(&Padding::default()).is_empty());
    }

    #[test]
    fn test_uniform_radius() {
        let radius = Value::Definite(CornerRadius::Uniform(8.0));
        assert_eq!(radius_classes(&radius, false), vec!["rounded-lg"]);
    }

    #[test]
    fn test_plain_rounded_has_no_suffix() {
        let radius = Value::Definite(CornerRadius::Uniform(4.0));
        assert_eq!(radius_classes(&radius, false), vec!["rounded"]);
    }

    #[test]
    fn test_ellipse_is_rounded_full() {
        let radius = Value::Definite(CornerRadius::Uniform(0.0));
        assert_eq!(radius_classes(&radius, true), vec!["rounded-full"]);
    }

    #[test]
    fn test_mixed_radius_is_silent() {
        let radius: Value<CornerRadius> = Value::Mixed;
        assert!(radius_classes(&radius, false).is_empty());
    }
}

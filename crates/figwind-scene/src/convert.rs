//! Node normalizer.
//!
//! Maps raw host nodes onto the closed [`SceneNode`] model, applying the
//! per-variant fixups the rest of the pipeline relies on: line height/stroke
//! correction, vector placeholder fills, rotated-position compensation, and
//! defensive parsing of the metadata blobs. Unrecognized node variants are
//! filtered out, not reported.

use crate::geometry::rotated_bounding_rect;
use crate::raw::{RawEffect, RawNode, RawPaint};
use crate::types::{
    BlendBlock, BlendMode, ContainerProps, CornerRadius, CounterAlign, Effect, EffectKind,
    FontName, InstanceProps, Interaction, LayoutAlign, LayoutBlock, LayoutMode, LetterSpacing,
    LineHeight, NodeKind, Padding, Paint, PrimaryAlign, Rgb, SceneNode, ShapeStyle, SizingMode,
    StrokeAlign, TextAlignHorizontal, TextAlignVertical, TextAutoResize, TextCase, TextDecoration,
    TextProps, Value,
};

/// Convert a sequence of raw root nodes into normalized scene nodes.
pub fn convert_nodes(raw: &[RawNode]) -> Vec<SceneNode> {
    raw.iter().filter_map(convert_node).collect()
}

fn convert_node(raw: &RawNode) -> Option<SceneNode> {
    let kind = match raw.node_type.as_str() {
        "RECTANGLE" => NodeKind::Rectangle(convert_shape_style(raw)),
        "ELLIPSE" => NodeKind::Ellipse(convert_shape_style(raw)),
        "LINE" => NodeKind::Line(convert_shape_style(raw)),
        "VECTOR" => NodeKind::Vector(convert_shape_style(raw)),
        "TEXT" => NodeKind::Text(convert_text(raw)),
        "FRAME" => NodeKind::Frame(convert_container(raw)),
        "GROUP" => NodeKind::Group(convert_container(raw)),
        "COMPONENT" => NodeKind::Component(convert_container(raw)),
        "INSTANCE" => NodeKind::Instance(InstanceProps {
            container: convert_container(raw),
            main_component_name: raw
                .main_component
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            interactions: parse_interactions(raw.interactions.as_deref()),
        }),
        _ => return None,
    };

    let mut node = SceneNode {
        id: raw.id.clone(),
        name: raw.name.clone(),
        visible: raw.visible,
        locked: raw.locked,
        layout: convert_layout(raw),
        blend: convert_blend(raw),
        layout_align: match raw.layout_align.as_str() {
            "STRETCH" => LayoutAlign::Stretch,
            _ => LayoutAlign::Inherit,
        },
        layout_grow: raw.layout_grow,
        kind,
    };

    match &mut node.kind {
        NodeKind::Line(style) => {
            // Lines report a height of zero, but downstream math needs one.
            node.layout.height = 1.0;
            style.stroke_align = StrokeAlign::Center;
            style.stroke_weight = (style.stroke_weight - 1.0).max(0.0);
        }
        NodeKind::Vector(style) => {
            // Vector paths are not rendered; stand in with a rounded tinted box.
            style.corner_radius = Value::Definite(CornerRadius::Uniform(8.0));
            let empty = match &style.fills {
                Value::Definite(fills) => fills.is_empty(),
                Value::Mixed => true,
            };
            if empty {
                style.fills = Value::Definite(vec![Paint::Solid {
                    color: Rgb { r: 0.5, g: 0.23, b: 0.27 },
                    opacity: 0.5,
                    visible: true,
                }]);
            }
        }
        _ => {}
    }

    Some(node)
}

fn convert_layout(raw: &RawNode) -> LayoutBlock {
    let mut layout = LayoutBlock {
        x: raw.x,
        y: raw.y,
        width: raw.width,
        height: raw.height,
        rotation: raw.rotation,
        absolute_transform: raw
            .absolute_transform
            .unwrap_or([[1.0, 0.0, raw.x], [0.0, 1.0, raw.y]]),
    };

    // A rotated node's reported x/y is its pre-rotation corner. Replace it
    // with the bounding-box minimum so downstream gap math stays sane.
    if raw.rotation.round() != 0.0 {
        let (x, y) = rotated_bounding_rect(&layout.absolute_transform, raw.width, raw.height);
        layout.x = x;
        layout.y = y;
    }

    layout
}

fn convert_blend(raw: &RawNode) -> BlendBlock {
    BlendBlock {
        opacity: raw.opacity,
        blend_mode: convert_blend_mode(&raw.blend_mode),
        effects: raw.effects.iter().filter_map(convert_effect).collect(),
    }
}

fn convert_blend_mode(s: &str) -> BlendMode {
    match s {
        "NORMAL" => BlendMode::Normal,
        "MULTIPLY" => BlendMode::Multiply,
        "SCREEN" => BlendMode::Screen,
        "OVERLAY" => BlendMode::Overlay,
        "DARKEN" => BlendMode::Darken,
        "LIGHTEN" => BlendMode::Lighten,
        "COLOR_DODGE" => BlendMode::ColorDodge,
        "COLOR_BURN" => BlendMode::ColorBurn,
        "HARD_LIGHT" => BlendMode::HardLight,
        "SOFT_LIGHT" => BlendMode::SoftLight,
        "DIFFERENCE" => BlendMode::Difference,
        "EXCLUSION" => BlendMode::Exclusion,
        "HUE" => BlendMode::Hue,
        "SATURATION" => BlendMode::Saturation,
        "COLOR" => BlendMode::Color,
        "LUMINOSITY" => BlendMode::Luminosity,
        _ => BlendMode::PassThrough,
    }
}

fn convert_effect(raw: &RawEffect) -> Option<Effect> {
    let kind = match raw.effect_type.as_str() {
        "DROP_SHADOW" => EffectKind::DropShadow,
        "INNER_SHADOW" => EffectKind::InnerShadow,
        "LAYER_BLUR" => EffectKind::LayerBlur,
        "BACKGROUND_BLUR" => EffectKind::BackgroundBlur,
        _ => return None,
    };
    Some(Effect {
        kind,
        visible: raw.visible,
        offset_x: raw.offset.x,
        offset_y: raw.offset.y,
        radius: raw.radius,
        spread: raw.spread,
        color: raw.color,
    })
}

fn convert_paint(raw: &RawPaint) -> Option<Paint> {
    match raw.paint_type.as_str() {
        "SOLID" => Some(Paint::Solid {
            color: raw.color.unwrap_or_default(),
            opacity: raw.opacity,
            visible: raw.visible,
        }),
        "GRADIENT_LINEAR" => Some(Paint::LinearGradient {
            stops: raw
                .gradient_stops
                .iter()
                .map(|s| crate::types::ColorStop {
                    color: Rgb { r: s.color.r, g: s.color.g, b: s.color.b },
                    opacity: s.color.a,
                    position: s.position,
                })
                .collect(),
            transform: raw
                .gradient_transform
                .unwrap_or([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            visible: raw.visible,
        }),
        "IMAGE" => Some(Paint::Image { visible: raw.visible }),
        // Radial/angular/diamond gradients are out of scope.
        _ => None,
    }
}

fn convert_paints(raw: &[RawPaint]) -> Vec<Paint> {
    raw.iter().filter_map(convert_paint).collect()
}

fn convert_shape_style(raw: &RawNode) -> ShapeStyle {
    let corner_radius = if raw.top_left_radius.is_some()
        || raw.top_right_radius.is_some()
        || raw.bottom_right_radius.is_some()
        || raw.bottom_left_radius.is_some()
    {
        Value::Definite(CornerRadius::PerCorner {
            top_left: raw.top_left_radius.unwrap_or(0.0),
            top_right: raw.top_right_radius.unwrap_or(0.0),
            bottom_right: raw.bottom_right_radius.unwrap_or(0.0),
            bottom_left: raw.bottom_left_radius.unwrap_or(0.0),
        })
    } else {
        match &raw.corner_radius {
            Some(Value::Definite(r)) => Value::Definite(CornerRadius::Uniform(*r)),
            Some(Value::Mixed) => Value::Mixed,
            None => Value::Definite(CornerRadius::Uniform(0.0)),
        }
    };

    ShapeStyle {
        fills: match &raw.fills {
            Value::Definite(list) => Value::Definite(convert_paints(list)),
            Value::Mixed => Value::Mixed,
        },
        strokes: convert_paints(&raw.strokes),
        stroke_weight: raw.stroke_weight,
        stroke_align: match raw.stroke_align.as_str() {
            "INSIDE" => StrokeAlign::Inside,
            "OUTSIDE" => StrokeAlign::Outside,
            _ => StrokeAlign::Center,
        },
        corner_radius,
    }
}

fn convert_container(raw: &RawNode) -> ContainerProps {
    let mut primary_align = match raw.primary_axis_align_items.as_str() {
        "CENTER" => PrimaryAlign::Center,
        "MAX" => PrimaryAlign::Max,
        "SPACE_BETWEEN" => PrimaryAlign::SpaceBetween,
        _ => PrimaryAlign::Min,
    };

    // space-between with a single child renders at the start in flexbox;
    // centering matches what the canvas shows.
    if primary_align == PrimaryAlign::SpaceBetween && raw.children.len() == 1 {
        primary_align = PrimaryAlign::Center;
    }

    ContainerProps {
        children: convert_nodes(&raw.children),
        layout_mode: match raw.layout_mode.as_str() {
            "HORIZONTAL" => LayoutMode::Horizontal,
            "VERTICAL" => LayoutMode::Vertical,
            _ => LayoutMode::None,
        },
        primary_axis_sizing_mode: convert_sizing(&raw.primary_axis_sizing_mode),
        counter_axis_sizing_mode: convert_sizing(&raw.counter_axis_sizing_mode),
        primary_axis_align_items: primary_align,
        counter_axis_align_items: match raw.counter_axis_align_items.as_str() {
            "CENTER" => CounterAlign::Center,
            "MAX" => CounterAlign::Max,
            _ => CounterAlign::Min,
        },
        padding: Padding {
            left: raw.padding_left,
            right: raw.padding_right,
            top: raw.padding_top,
            bottom: raw.padding_bottom,
        },
        item_spacing: raw.item_spacing,
        clips_content: raw.clips_content,
        is_relative: false,
        style: convert_shape_style(raw),
        focus_section: parse_focus_section(raw.focus_section.as_deref()),
    }
}

fn convert_sizing(s: &str) -> SizingMode {
    match s {
        "AUTO" => SizingMode::Auto,
        _ => SizingMode::Fixed,
    }
}

fn convert_text(raw: &RawNode) -> TextProps {
    TextProps {
        characters: raw.characters.clone(),
        font_size: raw.font_size,
        font_name: map_value(&raw.font_name, |f| FontName {
            family: f.family.clone(),
            style: f.style.clone(),
        }),
        text_case: map_value(&raw.text_case, |s| match s.as_str() {
            "UPPER" => TextCase::Upper,
            "LOWER" => TextCase::Lower,
            "TITLE" => TextCase::Title,
            _ => TextCase::Original,
        }),
        text_decoration: map_value(&raw.text_decoration, |s| match s.as_str() {
            "UNDERLINE" => TextDecoration::Underline,
            "STRIKETHROUGH" => TextDecoration::Strikethrough,
            _ => TextDecoration::None,
        }),
        letter_spacing: map_value(&raw.letter_spacing, |ls| match ls.unit.as_str() {
            "PERCENT" => LetterSpacing::Percent(ls.value),
            _ => LetterSpacing::Pixels(ls.value),
        }),
        line_height: map_value(&raw.line_height, |lh| match (lh.unit.as_str(), lh.value) {
            ("PIXELS", Some(v)) => LineHeight::Pixels(v),
            ("PERCENT", Some(v)) => LineHeight::Percent(v),
            _ => LineHeight::Auto,
        }),
        align_horizontal: match raw.text_align_horizontal.as_str() {
            "CENTER" => TextAlignHorizontal::Center,
            "RIGHT" => TextAlignHorizontal::Right,
            "JUSTIFIED" => TextAlignHorizontal::Justified,
            _ => TextAlignHorizontal::Left,
        },
        align_vertical: match raw.text_align_vertical.as_str() {
            "CENTER" => TextAlignVertical::Center,
            "BOTTOM" => TextAlignVertical::Bottom,
            _ => TextAlignVertical::Top,
        },
        auto_resize: match raw.text_auto_resize.as_str() {
            "WIDTH_AND_HEIGHT" => TextAutoResize::WidthAndHeight,
            "HEIGHT" => TextAutoResize::Height,
            _ => TextAutoResize::None,
        },
        style: convert_shape_style(raw),
    }
}

fn map_value<T, U>(value: &Value<T>, f: impl FnOnce(&T) -> U) -> Value<U> {
    match value {
        Value::Definite(v) => Value::Definite(f(v)),
        Value::Mixed => Value::Mixed,
    }
}

/// Parse the "interactions" metadata blob. Malformed JSON is an empty list,
/// never an error that aborts the run.
fn parse_interactions(blob: Option<&str>) -> Vec<Interaction> {
    blob.and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or_default()
}

/// Parse the "focusSection" metadata blob. Malformed JSON means no section.
fn parse_focus_section(blob: Option<&str>) -> Option<serde_json::Value> {
    blob.and_then(|text| serde_json::from_str(text).ok())
}

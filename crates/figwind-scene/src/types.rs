//! Normalized scene tree.
//!
//! Plain owned data: a parent exclusively owns its children, and there are
//! no back-references. Passes that need parent context (padding, stretch,
//! position classes) receive it as a parameter instead.

use serde::Deserialize;

/// A 2×3 affine transform in row-major order, as the host supplies it.
pub type Mat2x3 = [[f64; 3]; 2];

/// A host attribute that may hold one definite value or the host's "mixed"
/// sentinel (different values across a multi-selection or text range).
///
/// Serialized form of the sentinel is the literal string `"mixed"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<T> {
    Definite(T),
    Mixed,
}

impl<T> Value<T> {
    pub fn as_definite(&self) -> Option<&T> {
        match self {
            Value::Definite(v) => Some(v),
            Value::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Value::Mixed)
    }
}

impl<T: Default> Default for Value<T> {
    fn default() -> Self {
        Value::Definite(T::default())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Value<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        enum Sentinel {
            #[serde(rename = "mixed")]
            Mixed,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Definite(T),
            Mixed(Sentinel),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Definite(v) => Value::Definite(v),
            Repr::Mixed(_) => Value::Mixed,
        })
    }
}

// ---------------------------------------------------------------------------
// Paint and effects
// ---------------------------------------------------------------------------

/// An RGB color with 0–1 float channels, as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// A gradient stop. `position` runs 0–1 along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgb,
    pub opacity: f64,
    pub position: f64,
}

/// A resolved fill or stroke.
///
/// Radial/angular gradients and unknown paint types are dropped by the
/// normalizer, so they never appear here.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid {
        color: Rgb,
        opacity: f64,
        visible: bool,
    },
    LinearGradient {
        stops: Vec<ColorStop>,
        transform: Mat2x3,
        visible: bool,
    },
    Image {
        visible: bool,
    },
}

impl Paint {
    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid { visible, .. }
            | Paint::LinearGradient { visible, .. }
            | Paint::Image { visible } => *visible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

/// A visual effect. Only shadows produce output; blurs are carried but
/// generate nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub visible: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub radius: f64,
    pub spread: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

// ---------------------------------------------------------------------------
// Layout enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    #[default]
    Fixed,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterAlign {
    #[default]
    Min,
    Center,
    Max,
}

/// Per-child cross-axis directive inside an auto-layout parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlign {
    #[default]
    Inherit,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeAlign {
    #[default]
    Center,
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    PassThrough,
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword, or `None` for the pass-through default.
    pub fn css_token(&self) -> Option<&'static str> {
        match self {
            BlendMode::PassThrough => None,
            BlendMode::Normal => Some("normal"),
            BlendMode::Multiply => Some("multiply"),
            BlendMode::Screen => Some("screen"),
            BlendMode::Overlay => Some("overlay"),
            BlendMode::Darken => Some("darken"),
            BlendMode::Lighten => Some("lighten"),
            BlendMode::ColorDodge => Some("color-dodge"),
            BlendMode::ColorBurn => Some("color-burn"),
            BlendMode::HardLight => Some("hard-light"),
            BlendMode::SoftLight => Some("soft-light"),
            BlendMode::Difference => Some("difference"),
            BlendMode::Exclusion => Some("exclusion"),
            BlendMode::Hue => Some("hue"),
            BlendMode::Saturation => Some("saturation"),
            BlendMode::Color => Some("color"),
            BlendMode::Luminosity => Some("luminosity"),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute blocks
// ---------------------------------------------------------------------------

/// Geometric layout block shared by every node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    /// Position relative to the owning container.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, unbounded; snapping normalizes to [-180, 180].
    pub rotation: f64,
    pub absolute_transform: Mat2x3,
}

impl Default for LayoutBlock {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            absolute_transform: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlendBlock {
    pub opacity: f64,
    pub blend_mode: BlendMode,
    pub effects: Vec<Effect>,
}

impl Default for BlendBlock {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blend_mode: BlendMode::PassThrough,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerRadius {
    Uniform(f64),
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

impl Default for CornerRadius {
    fn default() -> Self {
        CornerRadius::Uniform(0.0)
    }
}

/// Paint and stroke attributes of a shape-bearing node.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fills: Value<Vec<Paint>>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: f64,
    pub stroke_align: StrokeAlign,
    pub corner_radius: Value<CornerRadius>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fills: Value::Definite(Vec::new()),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_align: StrokeAlign::Center,
            corner_radius: Value::Definite(CornerRadius::Uniform(0.0)),
        }
    }
}

/// The topmost visible fill, which decides the element's background (and
/// whether the emitter uses an `<img>` tag).
pub fn top_visible_fill(fills: &Value<Vec<Paint>>) -> Option<&Paint> {
    match fills {
        Value::Definite(list) => list.iter().rev().find(|p| p.is_visible()),
        Value::Mixed => None,
    }
}

// ---------------------------------------------------------------------------
// Container, text, instance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainerProps {
    pub children: Vec<SceneNode>,
    pub layout_mode: LayoutMode,
    pub primary_axis_sizing_mode: SizingMode,
    pub counter_axis_sizing_mode: SizingMode,
    pub primary_axis_align_items: PrimaryAlign,
    pub counter_axis_align_items: CounterAlign,
    pub padding: Padding,
    pub item_spacing: f64,
    pub clips_content: bool,
    /// Children could not be resolved to a single flex direction; emit them
    /// absolutely positioned against this container's origin.
    pub is_relative: bool,
    pub style: ShapeStyle,
    /// Free-form focus-navigation configuration from the host's node store.
    pub focus_section: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels(f64),
    /// Percent of the font size.
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LetterSpacing {
    Pixels(f64),
    Percent(f64),
}

impl Default for LetterSpacing {
    fn default() -> Self {
        LetterSpacing::Pixels(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAutoResize {
    #[default]
    None,
    WidthAndHeight,
    Height,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextProps {
    pub characters: String,
    pub font_size: Value<f64>,
    pub font_name: Value<FontName>,
    pub text_case: Value<TextCase>,
    pub text_decoration: Value<TextDecoration>,
    pub letter_spacing: Value<LetterSpacing>,
    pub line_height: Value<LineHeight>,
    pub align_horizontal: TextAlignHorizontal,
    pub align_vertical: TextAlignVertical,
    pub auto_resize: TextAutoResize,
    pub style: ShapeStyle,
}

/// A trigger/action pair from the host's "interactions" metadata blob.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Interaction {
    pub trigger: InteractionTrigger,
    pub action: InteractionAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InteractionTrigger {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InteractionAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub option: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceProps {
    pub container: ContainerProps,
    pub main_component_name: String,
    pub interactions: Vec<Interaction>,
}

// ---------------------------------------------------------------------------
// The node itself
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Rectangle(ShapeStyle),
    Ellipse(ShapeStyle),
    Line(ShapeStyle),
    Vector(ShapeStyle),
    Text(TextProps),
    Frame(ContainerProps),
    Group(ContainerProps),
    Component(ContainerProps),
    Instance(InstanceProps),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub layout: LayoutBlock,
    pub blend: BlendBlock,
    pub layout_align: LayoutAlign,
    pub layout_grow: f64,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn container(&self) -> Option<&ContainerProps> {
        match &self.kind {
            NodeKind::Frame(c) | NodeKind::Group(c) | NodeKind::Component(c) => Some(c),
            NodeKind::Instance(i) => Some(&i.container),
            _ => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<&mut ContainerProps> {
        match &mut self.kind {
            NodeKind::Frame(c) | NodeKind::Group(c) | NodeKind::Component(c) => Some(c),
            NodeKind::Instance(i) => Some(&mut i.container),
            _ => None,
        }
    }

    /// Paint attributes, for every variant that carries them.
    pub fn shape_style(&self) -> Option<&ShapeStyle> {
        match &self.kind {
            NodeKind::Rectangle(s)
            | NodeKind::Ellipse(s)
            | NodeKind::Line(s)
            | NodeKind::Vector(s) => Some(s),
            NodeKind::Text(t) => Some(&t.style),
            NodeKind::Frame(c) | NodeKind::Group(c) | NodeKind::Component(c) => Some(&c.style),
            NodeKind::Instance(i) => Some(&i.container.style),
        }
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self.kind, NodeKind::Rectangle(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Value<T> deserialization
    // =========================================================================

    #[test]
    fn test_value_definite() {
        let v: Value<f64> = serde_json::from_str("16").unwrap();
        assert_eq!(v, Value::Definite(16.0));
    }

    #[test]
    fn test_value_mixed_sentinel() {
        let v: Value<f64> = serde_json::from_str("\"mixed\"").unwrap();
        assert!(v.is_mixed());
    }

    #[test]
    fn test_value_rejects_other_strings() {
        let v: Result<Value<f64>, _> = serde_json::from_str("\"sixteen\"");
        assert!(v.is_err());
    }

    // =========================================================================
    // Fill resolution
    // =========================================================================

    #[test]
    fn test_top_visible_fill_skips_hidden() {
        let fills = Value::Definite(vec![
            Paint::Solid {
                color: Rgb { r: 1.0, g: 0.0, b: 0.0 },
                opacity: 1.0,
                visible: true,
            },
            Paint::Image { visible: false },
        ]);
        let top = top_visible_fill(&fills).unwrap();
        assert!(matches!(top, Paint::Solid { .. }));
    }

    #[test]
    fn test_top_visible_fill_mixed_is_none() {
        let fills: Value<Vec<Paint>> = Value::Mixed;
        assert!(top_visible_fill(&fills).is_none());
    }
}

//! Raw node JSON as posted by the plugin host.
//!
//! Field names mirror the host scene-graph API (camelCase); everything is
//! defaulted so partial payloads deserialize. Type tags stay loose strings
//! here — the normalizer maps them onto the closed domain enums and drops
//! whatever it does not recognize.

use serde::Deserialize;

use crate::types::{Mat2x3, Rgb, Rgba, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub absolute_transform: Option<Mat2x3>,

    pub opacity: f64,
    pub blend_mode: String,
    pub effects: Vec<RawEffect>,

    pub fills: Value<Vec<RawPaint>>,
    pub strokes: Vec<RawPaint>,
    pub stroke_weight: f64,
    pub stroke_align: String,
    pub corner_radius: Option<Value<f64>>,
    pub top_left_radius: Option<f64>,
    pub top_right_radius: Option<f64>,
    pub bottom_right_radius: Option<f64>,
    pub bottom_left_radius: Option<f64>,

    pub layout_align: String,
    pub layout_grow: f64,

    pub layout_mode: String,
    pub primary_axis_sizing_mode: String,
    pub counter_axis_sizing_mode: String,
    pub primary_axis_align_items: String,
    pub counter_axis_align_items: String,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub item_spacing: f64,
    pub clips_content: bool,
    pub children: Vec<RawNode>,

    pub characters: String,
    pub font_size: Value<f64>,
    pub font_name: Value<RawFontName>,
    pub text_case: Value<String>,
    pub text_decoration: Value<String>,
    pub letter_spacing: Value<RawLetterSpacing>,
    pub line_height: Value<RawLineHeight>,
    pub text_align_horizontal: String,
    pub text_align_vertical: String,
    pub text_auto_resize: String,

    pub main_component: Option<Box<RawComponentRef>>,

    /// Opaque metadata blobs from the host's key/value node store, kept as
    /// JSON text and parsed defensively by the normalizer.
    pub interactions: Option<String>,
    pub focus_section: Option<String>,
}

impl Default for RawNode {
    fn default() -> Self {
        Self {
            node_type: String::new(),
            id: String::new(),
            name: String::new(),
            visible: true,
            locked: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            absolute_transform: None,
            opacity: 1.0,
            blend_mode: "PASS_THROUGH".into(),
            effects: Vec::new(),
            fills: Value::Definite(Vec::new()),
            strokes: Vec::new(),
            stroke_weight: 0.0,
            stroke_align: "CENTER".into(),
            corner_radius: None,
            top_left_radius: None,
            top_right_radius: None,
            bottom_right_radius: None,
            bottom_left_radius: None,
            layout_align: "INHERIT".into(),
            layout_grow: 0.0,
            layout_mode: "NONE".into(),
            primary_axis_sizing_mode: "FIXED".into(),
            counter_axis_sizing_mode: "FIXED".into(),
            primary_axis_align_items: "MIN".into(),
            counter_axis_align_items: "MIN".into(),
            padding_left: 0.0,
            padding_right: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
            item_spacing: 0.0,
            clips_content: false,
            children: Vec::new(),
            characters: String::new(),
            font_size: Value::Definite(16.0),
            font_name: Value::Definite(RawFontName::default()),
            text_case: Value::Definite("ORIGINAL".into()),
            text_decoration: Value::Definite("NONE".into()),
            letter_spacing: Value::Definite(RawLetterSpacing::default()),
            line_height: Value::Definite(RawLineHeight::default()),
            text_align_horizontal: "LEFT".into(),
            text_align_vertical: "TOP".into(),
            text_auto_resize: "NONE".into(),
            main_component: None,
            interactions: None,
            focus_section: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub color: Option<Rgb>,
    pub opacity: f64,
    pub visible: bool,
    pub gradient_stops: Vec<RawGradientStop>,
    pub gradient_transform: Option<Mat2x3>,
}

impl Default for RawPaint {
    fn default() -> Self {
        Self {
            paint_type: String::new(),
            color: None,
            opacity: 1.0,
            visible: true,
            gradient_stops: Vec::new(),
            gradient_transform: None,
        }
    }
}

/// Gradient stop as the host reports it: RGBA color plus a 0–1 position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct RawGradientStop {
    pub color: Rgba,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub visible: bool,
    pub offset: RawVector,
    pub radius: f64,
    pub spread: f64,
    pub color: Rgba,
}

impl Default for RawEffect {
    fn default() -> Self {
        Self {
            effect_type: String::new(),
            visible: true,
            offset: RawVector::default(),
            radius: 0.0,
            spread: 0.0,
            color: Rgba::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct RawVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawFontName {
    pub family: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLetterSpacing {
    pub unit: String,
    pub value: f64,
}

impl Default for RawLetterSpacing {
    fn default() -> Self {
        Self {
            unit: "PIXELS".into(),
            value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLineHeight {
    pub unit: String,
    pub value: Option<f64>,
}

impl Default for RawLineHeight {
    fn default() -> Self {
        Self {
            unit: "AUTO".into(),
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComponentRef {
    pub name: String,
}

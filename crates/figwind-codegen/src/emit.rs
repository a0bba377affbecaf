//! Markup emitter: recursive descent over the annotated tree.
//!
//! All emission state lives in an explicit [`EmitterContext`] threaded
//! through the recursion; a fresh context is built per run and the
//! features-used set it accumulates decides the script header.

use std::collections::BTreeSet;

use figwind_scene::types::{
    top_visible_fill, ContainerProps, LayoutMode, NodeKind, Paint, PrimaryAlign, SceneNode,
    TextAlignHorizontal, TextCase, TextDecoration, TextProps, Value,
};
use figwind_scene::types::{CounterAlign, LetterSpacing, LineHeight};

use crate::color::{background_classes, shadow_style, text_color_class};
use crate::style::{
    self, blend_classes, border_classes, padding_classes, radius_classes, ParentInfo, Position,
};
use crate::tables::{
    em_to_letter_spacing, fmt_px, percent_to_line_height, px_to_font_size, px_to_layout_size,
    px_to_line_height,
};
use crate::GenerateOptions;

/// Component names that resolve to real imports instead of generic markup.
const INCLUDED_COMPONENTS: &[&str] = &["Button", "Keypad"];

/// A capability the emitted markup depends on; each maps to one import line
/// in the script header.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feature {
    FocusSection,
    Select,
    Component(String),
}

/// Per-run emission state. Nothing here outlives a single `generate` call.
pub struct EmitterContext<'a> {
    pub options: &'a GenerateOptions,
    pub features: BTreeSet<Feature>,
}

impl<'a> EmitterContext<'a> {
    pub fn new(options: &'a GenerateOptions) -> Self {
        Self { options, features: BTreeSet::new() }
    }

    /// Script header for the features used by this run, or an empty string
    /// when no imports are needed.
    pub fn header(&self) -> String {
        if self.features.is_empty() {
            return String::new();
        }
        let mut lines = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            match feature {
                Feature::FocusSection => {
                    lines.push("  import { focusSection } from './actions/focusSection'".into());
                }
                Feature::Select => {
                    lines.push("  import { select } from './actions/select'".into());
                }
                Feature::Component(name) => {
                    lines.push(format!("  import {name} from './components/{name}.svelte'"));
                }
            }
        }
        format!("<script>\n{}\n</script>\n", lines.join("\n"))
    }
}

/// Emit one node (and its subtree) at the given indentation depth.
pub fn emit_node(
    node: &SceneNode,
    parent: Option<&ParentInfo>,
    depth: usize,
    ctx: &mut EmitterContext,
) -> String {
    match &node.kind {
        NodeKind::Text(text) => emit_text(node, text, parent, depth, ctx),
        NodeKind::Frame(_) | NodeKind::Group(_) | NodeKind::Component(_) => {
            let container = node.container().expect("checked variant");
            emit_container(node, container, parent, depth, ctx)
        }
        NodeKind::Instance(instance) => {
            if INCLUDED_COMPONENTS.contains(&instance.main_component_name.as_str()) {
                emit_included_component(node, depth, ctx)
            } else {
                emit_container(node, &instance.container, parent, depth, ctx)
            }
        }
        NodeKind::Rectangle(_) | NodeKind::Ellipse(_) | NodeKind::Line(_)
        | NodeKind::Vector(_) => emit_leaf(node, parent, depth, ctx),
    }
}

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

fn emit_leaf(
    node: &SceneNode,
    parent: Option<&ParentInfo>,
    depth: usize,
    ctx: &mut EmitterContext,
) -> String {
    // Rounding upstream can leave near-zero negative sizes behind.
    if node.layout.width <= 0.0 || node.layout.height <= 0.0 {
        return String::new();
    }

    let style = node.shape_style().expect("leaf carries a style");
    let mut classes = layer_name_prefix(node, ctx);
    let mut styles = Vec::new();

    collect_position(node, parent, ctx, &mut classes, &mut styles);
    let (size_cls, size_styles) = style::size_classes(node, parent);
    classes.extend(size_cls);
    styles.extend(size_styles);

    classes.extend(radius_classes(
        &style.corner_radius,
        matches!(node.kind, NodeKind::Ellipse(_)),
    ));
    classes.extend(border_classes(style));
    classes.extend(background_classes(&style.fills));
    classes.extend(blend_classes(node));
    if !node.visible {
        classes.push("invisible".into());
    }
    if let Some(shadow) = shadow_style(&node.blend.effects) {
        styles.push(shadow);
    }

    let indent = "  ".repeat(depth);
    if is_image_fill(&style.fills) {
        let src = placeholder_src(node);
        return format!(
            "{indent}<img{}{} src=\"{src}\"/>\n",
            class_attr(&classes),
            style_attr(&styles),
        );
    }
    if classes.is_empty() && styles.is_empty() {
        return String::new();
    }
    format!("{indent}<div{}{}></div>\n", class_attr(&classes), style_attr(&styles))
}

fn is_image_fill(fills: &Value<Vec<Paint>>) -> bool {
    matches!(top_visible_fill(fills), Some(Paint::Image { .. }))
}

fn placeholder_src(node: &SceneNode) -> String {
    format!(
        "https://via.placeholder.com/{}x{}",
        node.layout.width.round() as i64,
        node.layout.height.round() as i64,
    )
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

fn emit_container(
    node: &SceneNode,
    container: &ContainerProps,
    parent: Option<&ParentInfo>,
    depth: usize,
    ctx: &mut EmitterContext,
) -> String {
    if let Some(placeholder) = input_placeholder(container) {
        return emit_input(node, container, parent, depth, ctx, &placeholder);
    }

    let mut classes = layer_name_prefix(node, ctx);
    let mut styles = Vec::new();
    let mut attrs = Vec::new();

    classes.extend(flex_classes(node, container, parent));
    if container.is_relative {
        classes.push("relative".into());
    }

    collect_position(node, parent, ctx, &mut classes, &mut styles);
    let (size_cls, size_styles) = style::size_classes(node, parent);
    classes.extend(size_cls);
    styles.extend(size_styles);

    classes.extend(padding_classes(&container.padding));
    classes.extend(radius_classes(&container.style.corner_radius, false));
    classes.extend(border_classes(&container.style));
    classes.extend(background_classes(&container.style.fills));
    classes.extend(blend_classes(node));
    if !node.visible {
        classes.push("invisible".into());
    }
    if let Some(shadow) = shadow_style(&node.blend.effects) {
        styles.push(shadow);
    }

    if let Some(config) = &container.focus_section {
        ctx.features.insert(Feature::FocusSection);
        attrs.push(format!("use:focusSection={{{config}}}"));
    }
    if let NodeKind::Instance(instance) = &node.kind {
        if let Some(option) = select_option(instance) {
            ctx.features.insert(Feature::Select);
            attrs.push(format!("on:click={{() => select('{option}')}}"));
        }
    }

    let info = child_parent_info(node, container);
    let child_depth = if classes.is_empty() && styles.is_empty() && attrs.is_empty() {
        depth
    } else {
        depth + 1
    };
    let mut body = String::new();
    for child in &container.children {
        body.push_str(&emit_node(child, Some(&info), child_depth, ctx));
    }

    // A wrapper with nothing to say contributes nothing of its own.
    if classes.is_empty() && styles.is_empty() && attrs.is_empty() {
        return body;
    }

    let indent = "  ".repeat(depth);
    if body.is_empty() {
        if is_image_fill(&container.style.fills) {
            let src = placeholder_src(node);
            return format!(
                "{indent}<img{}{}{} src=\"{src}\"/>\n",
                class_attr(&classes),
                style_attr(&styles),
                attr_suffix(&attrs),
            );
        }
        return format!(
            "{indent}<div{}{}{}></div>\n",
            class_attr(&classes),
            style_attr(&styles),
            attr_suffix(&attrs),
        );
    }
    format!(
        "{indent}<div{}{}{}>\n{body}{indent}</div>\n",
        class_attr(&classes),
        style_attr(&styles),
        attr_suffix(&attrs),
    )
}

/// Flex wrapper tokens for an auto-layout container.
///
/// A container holding exactly one child of its own size is a degenerate
/// wrapper; it gets no flex tokens at all.
fn flex_classes(
    node: &SceneNode,
    container: &ContainerProps,
    parent: Option<&ParentInfo>,
) -> Vec<String> {
    if container.layout_mode == LayoutMode::None || container.children.is_empty() {
        return Vec::new();
    }
    if container.children.len() == 1 {
        let child = &container.children[0];
        if child.layout.width == node.layout.width && child.layout.height == node.layout.height {
            return Vec::new();
        }
    }

    // `flex` when this node flows inside the parent's own flex direction,
    // `inline-flex` otherwise.
    let display = match parent {
        Some(p) if p.layout_mode == container.layout_mode => "flex",
        _ => "inline-flex",
    };
    let mut classes = vec![display.to_string()];
    classes.push(
        match container.layout_mode {
            LayoutMode::Vertical => "flex-col",
            _ => "flex-row",
        }
        .into(),
    );
    if container.primary_axis_align_items != PrimaryAlign::SpaceBetween
        && container.item_spacing > 0.0
    {
        let axis = match container.layout_mode {
            LayoutMode::Vertical => "space-y",
            _ => "space-x",
        };
        classes.push(format!("{axis}-{}", px_to_layout_size(container.item_spacing)));
    }
    classes.push(
        match container.primary_axis_align_items {
            PrimaryAlign::Min => "justify-start",
            PrimaryAlign::Center => "justify-center",
            PrimaryAlign::Max => "justify-end",
            PrimaryAlign::SpaceBetween => "justify-between",
        }
        .into(),
    );
    classes.push(
        match container.counter_axis_align_items {
            CounterAlign::Min => "items-start",
            CounterAlign::Center => "items-center",
            CounterAlign::Max => "items-end",
        }
        .into(),
    );
    classes
}

fn child_parent_info(node: &SceneNode, container: &ContainerProps) -> ParentInfo {
    ParentInfo {
        id: node.id.clone(),
        layout_mode: container.layout_mode,
        is_relative: container.is_relative,
        width: node.layout.width,
        height: node.layout.height,
        padding: container.padding,
    }
}

fn select_option(instance: &figwind_scene::types::InstanceProps) -> Option<&str> {
    instance
        .interactions
        .iter()
        .find(|i| i.trigger.kind == "ON_CLICK" && i.action.kind == "SELECT")
        .and_then(|i| i.action.option.as_deref())
}

fn emit_included_component(node: &SceneNode, depth: usize, ctx: &mut EmitterContext) -> String {
    let NodeKind::Instance(instance) = &node.kind else {
        return String::new();
    };
    let name = instance.main_component_name.clone();
    ctx.features.insert(Feature::Component(name.clone()));

    let mut attrs = Vec::new();
    if let Some(config) = &instance.container.focus_section {
        ctx.features.insert(Feature::FocusSection);
        attrs.push(format!("use:focusSection={{{config}}}"));
    }
    if let Some(option) = select_option(instance) {
        ctx.features.insert(Feature::Select);
        attrs.push(format!("on:click={{() => select('{option}')}}"));
    }

    let indent = "  ".repeat(depth);
    format!("{indent}<{name}{}/>\n", attr_suffix(&attrs))
}

// ---------------------------------------------------------------------------
// Text and inputs
// ---------------------------------------------------------------------------

/// A container with exactly one text child named "input" renders as an
/// `<input>` carrying the text as its placeholder.
fn input_placeholder(container: &ContainerProps) -> Option<String> {
    let [only] = container.children.as_slice() else {
        return None;
    };
    let NodeKind::Text(text) = &only.kind else {
        return None;
    };
    if only.name.eq_ignore_ascii_case("input") {
        Some(text.characters.clone())
    } else {
        None
    }
}

fn emit_input(
    node: &SceneNode,
    container: &ContainerProps,
    parent: Option<&ParentInfo>,
    depth: usize,
    ctx: &mut EmitterContext,
    placeholder: &str,
) -> String {
    let mut classes = layer_name_prefix(node, ctx);
    let mut styles = Vec::new();

    collect_position(node, parent, ctx, &mut classes, &mut styles);
    let (size_cls, size_styles) = style::size_classes(node, parent);
    classes.extend(size_cls);
    styles.extend(size_styles);
    classes.extend(padding_classes(&container.padding));
    classes.extend(radius_classes(&container.style.corner_radius, false));
    classes.extend(border_classes(&container.style));
    classes.extend(background_classes(&container.style.fills));
    classes.extend(blend_classes(node));

    let indent = "  ".repeat(depth);
    format!(
        "{indent}<input{}{} placeholder=\"{placeholder}\"/>\n",
        class_attr(&classes),
        style_attr(&styles),
    )
}

fn emit_text(
    node: &SceneNode,
    text: &TextProps,
    parent: Option<&ParentInfo>,
    depth: usize,
    ctx: &mut EmitterContext,
) -> String {
    let mut classes = layer_name_prefix(node, ctx);
    let mut styles = Vec::new();

    collect_position(node, parent, ctx, &mut classes, &mut styles);
    let (size_cls, size_styles) = text_size_classes(node, text, parent);
    classes.extend(size_cls);
    styles.extend(size_styles);
    classes.extend(text_classes(text));
    classes.extend(blend_classes(node));
    if !node.visible {
        classes.push("invisible".into());
    }

    let indent = "  ".repeat(depth);
    let content = text.characters.replace('\n', "<br/>");
    format!(
        "{indent}<p{}{}>{content}</p>\n",
        class_attr(&classes),
        style_attr(&styles),
    )
}

/// Text auto-resize modes suppress the axes that track content.
fn text_size_classes(
    node: &SceneNode,
    text: &TextProps,
    parent: Option<&ParentInfo>,
) -> (Vec<String>, Vec<String>) {
    use figwind_scene::types::TextAutoResize;
    match text.auto_resize {
        TextAutoResize::WidthAndHeight => (Vec::new(), Vec::new()),
        TextAutoResize::Height => style::width_classes(node, parent),
        TextAutoResize::None => style::size_classes(node, parent),
    }
}

fn text_classes(text: &TextProps) -> Vec<String> {
    let mut classes = Vec::new();

    if let Some(color) = text_color_class(&text.style.fills) {
        classes.push(color);
    }
    if let Some(size) = text.font_size.as_definite() {
        let token = px_to_font_size(*size);
        if token != "base" {
            classes.push(format!("text-{token}"));
        }
    }
    if let Some(font) = text.font_name.as_definite() {
        classes.extend(font_style_classes(&font.style));
    }
    match text.text_case.as_definite() {
        Some(TextCase::Upper) => classes.push("uppercase".into()),
        Some(TextCase::Lower) => classes.push("lowercase".into()),
        Some(TextCase::Title) => classes.push("capitalize".into()),
        _ => {}
    }
    match text.text_decoration.as_definite() {
        Some(TextDecoration::Underline) => classes.push("underline".into()),
        Some(TextDecoration::Strikethrough) => classes.push("line-through".into()),
        _ => {}
    }
    if let Some(spacing) = text.letter_spacing.as_definite() {
        let em = match spacing {
            LetterSpacing::Pixels(px) => px / 16.0,
            LetterSpacing::Percent(pct) => pct / 100.0,
        };
        let token = em_to_letter_spacing(em);
        if token != "normal" {
            classes.push(format!("tracking-{token}"));
        }
    }
    match text.line_height.as_definite() {
        Some(LineHeight::Pixels(px)) => {
            classes.push(format!("leading-{}", px_to_line_height(*px)));
        }
        Some(LineHeight::Percent(pct)) => {
            let token = percent_to_line_height(*pct);
            if token != "normal" {
                classes.push(format!("leading-{token}"));
            }
        }
        _ => {}
    }
    match text.align_horizontal {
        TextAlignHorizontal::Left => {}
        TextAlignHorizontal::Center => classes.push("text-center".into()),
        TextAlignHorizontal::Right => classes.push("text-right".into()),
        TextAlignHorizontal::Justified => classes.push("text-justify".into()),
    }

    classes
}

/// Weight/style tokens from the host's font style string.
fn font_style_classes(style: &str) -> Vec<String> {
    let lower = style.to_ascii_lowercase();
    let mut classes = Vec::new();
    if lower.contains("thin") {
        classes.push("font-thin".into());
    } else if lower.contains("extralight") || lower.contains("extra light") {
        classes.push("font-extralight".into());
    } else if lower.contains("semibold") || lower.contains("semi bold") {
        classes.push("font-semibold".into());
    } else if lower.contains("extrabold") || lower.contains("extra bold") {
        classes.push("font-extrabold".into());
    } else if lower.contains("light") {
        classes.push("font-light".into());
    } else if lower.contains("medium") {
        classes.push("font-medium".into());
    } else if lower.contains("black") {
        classes.push("font-black".into());
    } else if lower.contains("bold") {
        classes.push("font-bold".into());
    }
    if lower.contains("italic") {
        classes.push("italic".into());
    }
    classes
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn collect_position(
    node: &SceneNode,
    parent: Option<&ParentInfo>,
    ctx: &EmitterContext,
    classes: &mut Vec<String>,
    styles: &mut Vec<String>,
) {
    // Outermost roots are positioned by the selection context, not by us.
    if let (Some(ignored), Some(parent)) = (&ctx.options.ignore_stack_parent, parent) {
        if parent.id == *ignored {
            return;
        }
    }
    match style::position(node, parent) {
        Position::Static => {}
        Position::Classes(position) => classes.extend(position),
        Position::Inline { left, top } => {
            classes.push("absolute".into());
            styles.push(format!("left: {}px", fmt_px(left)));
            styles.push(format!("top: {}px", fmt_px(top)));
        }
    }
}

fn layer_name_prefix(node: &SceneNode, ctx: &EmitterContext) -> Vec<String> {
    if !ctx.options.show_layer_name {
        return Vec::new();
    }
    let sanitized = kebab_case(&node.name);
    if sanitized.is_empty() {
        Vec::new()
    } else {
        vec![sanitized]
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

fn class_attr(classes: &[String]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    }
}

fn style_attr(styles: &[String]) -> String {
    if styles.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", styles.join("; "))
    }
}

fn attr_suffix(attrs: &[String]) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.join(" "))
    }
}

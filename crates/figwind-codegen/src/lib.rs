//! Figwind Code Generator
//!
//! Turns a restructured scene tree into utility-class markup. Class builders
//! quantize continuous attributes onto the framework's discrete scales; the
//! emitter walks the tree and assembles the final document, collecting the
//! feature imports its output depends on.
//!
//! ```text
//! Vec<SceneNode> → generate() → script header + nested markup string
//! ```

pub mod color;
pub mod emit;
pub mod palette;
pub mod style;
pub mod tables;

use figwind_scene::SceneNode;

use emit::EmitterContext;

/// Options for a single generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Prefix each class attribute with the sanitized layer name.
    pub show_layer_name: bool,
    /// Id of the container the selection came from; its direct children get
    /// no position output since the caller decides where they land.
    pub ignore_stack_parent: Option<String>,
}

/// Generate markup for a forest of restructured root nodes.
///
/// Roots are emitted in input order. The script header appears only when at
/// least one feature import is needed; there is never a leading blank line.
pub fn generate(nodes: &[SceneNode], options: &GenerateOptions) -> String {
    let mut ctx = EmitterContext::new(options);
    let mut body = String::new();
    for node in nodes {
        body.push_str(&emit::emit_node(node, None, 0, &mut ctx));
    }
    format!("{}{body}", ctx.header())
}

//! WASM bindings for the Figwind generator.
//!
//! Exposes `generate()` to JavaScript via wasm-bindgen.
//! Returns the markup string or throws on error.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use figwind_codegen::GenerateOptions;

/// Options object accepted from JavaScript; all fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsOptions {
    show_layer_name: bool,
    ignore_stack_parent: Option<String>,
}

/// Generate utility-class markup for a scene JSON document.
///
/// `options` may be `undefined`, `null`, or an object
/// `{ showLayerName?: boolean, ignoreStackParent?: string }`.
/// Throws a JS error if the scene fails to parse or restructure.
#[wasm_bindgen]
pub fn generate(scene_json: &str, options: JsValue) -> Result<String, JsError> {
    let options = if options.is_undefined() || options.is_null() {
        JsOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };

    run_pipeline(
        scene_json,
        &GenerateOptions {
            show_layer_name: options.show_layer_name,
            ignore_stack_parent: options.ignore_stack_parent,
        },
    )
    .map_err(|e| JsError::new(&e))
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn run_pipeline(scene_json: &str, options: &GenerateOptions) -> Result<String, String> {
    let raw = figwind_scene::parse_scene(scene_json).map_err(|e| e.to_string())?;
    let nodes = figwind_scene::convert_nodes(&raw);
    let restructured = figwind_layout::restructure(nodes).map_err(|e| e.to_string())?;
    Ok(figwind_codegen::generate(&restructured, options))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // Native tests (non-WASM) — verify the generate pipeline works
    // =========================================================================

    fn native_generate(scene_json: &str) -> String {
        run_pipeline(scene_json, &GenerateOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_scene() {
        assert_eq!(native_generate("[]"), "");
    }

    #[test]
    fn test_single_rectangle() {
        let out = native_generate(
            r#"[{
                "type": "RECTANGLE",
                "id": "1:1",
                "name": "Box",
                "width": 64, "height": 64,
                "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 } }]
            }]"#,
        );
        assert_eq!(out, "<div class=\"w-16 h-16 bg-black\"></div>\n");
    }

    #[test]
    fn test_unknown_node_type_filtered() {
        let out = native_generate(
            r#"[{ "type": "STICKY", "id": "1:1", "name": "Note", "width": 64, "height": 64 }]"#,
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = run_pipeline("[{", &GenerateOptions::default()).unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn test_multiple_runs_share_no_state() {
        let a = native_generate(
            r#"[{ "type": "RECTANGLE", "id": "1:1", "name": "A", "width": 16, "height": 16,
                 "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }] }]"#,
        );
        let b = native_generate("[]");
        assert!(a.contains("bg-white"));
        assert_eq!(b, "");
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }
}

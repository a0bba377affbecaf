//! Fill, stroke, and effect rendering: background classes, text color,
//! gradient directions, and shadow inline styles.

use figwind_scene::geometry::nearest_value;
use figwind_scene::types::{
    top_visible_fill, ColorStop, Effect, EffectKind, Mat2x3, Paint, Rgb, Value,
};

use crate::palette::nearest_swatch;

/// Background classes for the topmost visible fill. Image fills produce no
/// class here; the emitter renders those as an `<img>` instead.
pub fn background_classes(fills: &Value<Vec<Paint>>) -> Vec<String> {
    match top_visible_fill(fills) {
        Some(Paint::Solid { color, .. }) => vec![format!("bg-{}", nearest_swatch(color))],
        Some(Paint::LinearGradient { stops, transform, .. }) => {
            gradient_classes(stops, transform)
        }
        Some(Paint::Image { .. }) | None => Vec::new(),
    }
}

/// Text color class for the topmost visible solid fill.
///
/// Pure opaque black is the browser default and is omitted.
pub fn text_color_class(fills: &Value<Vec<Paint>>) -> Option<String> {
    match top_visible_fill(fills) {
        Some(Paint::Solid { color, opacity, .. }) => {
            if color.r == 0.0 && color.g == 0.0 && color.b == 0.0 && *opacity == 1.0 {
                None
            } else {
                Some(format!("text-{}", nearest_swatch(color)))
            }
        }
        _ => None,
    }
}

/// Border color class for the topmost visible solid stroke.
pub fn border_color_class(strokes: &[Paint]) -> Option<String> {
    strokes
        .iter()
        .rev()
        .find(|p| p.is_visible())
        .and_then(|paint| match paint {
            Paint::Solid { color, .. } => Some(format!("border-{}", nearest_swatch(color))),
            _ => None,
        })
}

const GRADIENT_ANGLES: &[f64] = &[-180.0, -135.0, -90.0, -45.0, 0.0, 45.0, 90.0, 135.0, 180.0];

/// Compass token for a gradient transform, read from the rotation the
/// transform applies to the x axis and snapped to the eight CSS directions.
fn gradient_direction(transform: &Mat2x3) -> &'static str {
    let angle = transform[1][0].atan2(transform[0][0]).to_degrees();
    let snapped = nearest_value(angle, GRADIENT_ANGLES);
    match snapped as i64 {
        0 => "r",
        45 => "br",
        90 => "b",
        135 => "bl",
        -45 => "tr",
        -90 => "t",
        -135 => "tl",
        _ => "l",
    }
}

fn gradient_classes(stops: &[ColorStop], transform: &Mat2x3) -> Vec<String> {
    let mut classes = vec![format!("bg-gradient-to-{}", gradient_direction(transform))];
    match stops {
        [] => return Vec::new(),
        [only] => classes.push(format!("from-{}", nearest_swatch(&only.color))),
        [first, last] => {
            classes.push(format!("from-{}", nearest_swatch(&first.color)));
            classes.push(format!("to-{}", nearest_swatch(&last.color)));
        }
        [first, .., last] => {
            let middle = &stops[stops.len() / 2];
            classes.push(format!("from-{}", nearest_swatch(&first.color)));
            classes.push(format!("via-{}", nearest_swatch(&middle.color)));
            classes.push(format!("to-{}", nearest_swatch(&last.color)));
        }
    }
    classes
}

/// Inline `box-shadow` value for the visible shadow effects, or `None` when
/// there are none. Lengths scale from a 1920px design frame to rem.
pub fn shadow_style(effects: &[Effect]) -> Option<String> {
    let shadows: Vec<String> = effects
        .iter()
        .filter(|e| {
            e.visible && matches!(e.kind, EffectKind::DropShadow | EffectKind::InnerShadow)
        })
        .map(|e| {
            let rem = |px: f64| px / 1920.0 * 120.0;
            let inset = if e.kind == EffectKind::InnerShadow {
                "inset "
            } else {
                ""
            };
            format!(
                "{inset}{}rem {}rem {}rem {}rem rgba({}, {}, {}, {:.2})",
                rem(e.offset_x),
                rem(e.offset_y),
                rem(e.radius),
                rem(e.spread),
                (e.color.r * 255.0).round() as i64,
                (e.color.g * 255.0).round() as i64,
                (e.color.b * 255.0).round() as i64,
                e.color.a,
            )
        })
        .collect();

    if shadows.is_empty() {
        None
    } else {
        Some(format!("box-shadow: {}", shadows.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figwind_scene::types::Rgba;

    fn solid(r: f64, g: f64, b: f64) -> Value<Vec<Paint>> {
        Value::Definite(vec![Paint::Solid {
            color: Rgb { r, g, b },
            opacity: 1.0,
            visible: true,
        }])
    }

    // =========================================================================
    // Backgrounds and text color
    // =========================================================================

    #[test]
    fn test_solid_background() {
        assert_eq!(background_classes(&solid(0.0, 0.0, 0.0)), vec!["bg-black"]);
    }

    #[test]
    fn test_image_fill_has_no_background_class() {
        let fills = Value::Definite(vec![Paint::Image { visible: true }]);
        assert!(background_classes(&fills).is_empty());
    }

    #[test]
    fn test_opaque_black_text_is_default() {
        assert_eq!(text_color_class(&solid(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_nonblack_text_gets_class() {
        assert_eq!(
            text_color_class(&solid(1.0, 1.0, 1.0)).as_deref(),
            Some("text-white")
        );
    }

    #[test]
    fn test_translucent_black_text_gets_class() {
        let fills = Value::Definite(vec![Paint::Solid {
            color: Rgb { r: 0.0, g: 0.0, b: 0.0 },
            opacity: 0.5,
            visible: true,
        }]);
        assert_eq!(text_color_class(&fills).as_deref(), Some("text-black"));
    }

    // =========================================================================
    // Gradients
    // =========================================================================

    fn stop(r: f64, g: f64, b: f64, position: f64) -> ColorStop {
        ColorStop {
            color: Rgb { r, g, b },
            opacity: 1.0,
            position,
        }
    }

    #[test]
    fn test_two_stop_gradient() {
        let fills = Value::Definite(vec![Paint::LinearGradient {
            stops: vec![stop(1.0, 1.0, 1.0, 0.0), stop(0.0, 0.0, 0.0, 1.0)],
            transform: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            visible: true,
        }]);
        assert_eq!(
            background_classes(&fills),
            vec!["bg-gradient-to-r", "from-white", "to-black"]
        );
    }

    #[test]
    fn test_three_stop_gradient_gets_via() {
        let fills = Value::Definite(vec![Paint::LinearGradient {
            stops: vec![
                stop(1.0, 1.0, 1.0, 0.0),
                stop(0.937, 0.267, 0.267, 0.5),
                stop(0.0, 0.0, 0.0, 1.0),
            ],
            // 90° rotation points the axis down the page.
            transform: [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0]],
            visible: true,
        }]);
        assert_eq!(
            background_classes(&fills),
            vec!["bg-gradient-to-b", "from-white", "via-red-500", "to-black"]
        );
    }

    // =========================================================================
    // Shadows
    // =========================================================================

    #[test]
    fn test_drop_shadow_style() {
        let effects = vec![Effect {
            kind: EffectKind::DropShadow,
            visible: true,
            offset_x: 0.0,
            offset_y: 16.0,
            radius: 32.0,
            spread: 0.0,
            color: Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.25 },
        }];
        assert_eq!(
            shadow_style(&effects).as_deref(),
            Some("box-shadow: 0rem 1rem 2rem 0rem rgba(0, 0, 0, 0.25)")
        );
    }

    #[test]
    fn test_inner_shadow_is_inset() {
        let effects = vec![Effect {
            kind: EffectKind::InnerShadow,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            radius: 16.0,
            spread: 0.0,
            color: Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.5 },
        }];
        let style = shadow_style(&effects).unwrap();
        assert!(style.starts_with("box-shadow: inset "));
    }

    #[test]
    fn test_blur_effects_generate_nothing() {
        let effects = vec![Effect {
            kind: EffectKind::LayerBlur,
            visible: true,
            offset_x: 0.0,
            offset_y: 0.0,
            radius: 4.0,
            spread: 0.0,
            color: Rgba::default(),
        }];
        assert_eq!(shadow_style(&effects), None);
    }
}

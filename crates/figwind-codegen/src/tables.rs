//! Quantization tables: fixed lists of discrete utility-class values that
//! continuous pixel measurements snap to. On equal distance the earlier
//! table entry wins, matching `nearest_value`.

/// Snap `goal` against a keyed table, returning the token of the nearest key.
fn snap<'a>(goal: f64, table: &[(f64, &'a str)]) -> &'a str {
    let mut best = table[0];
    for entry in &table[1..] {
        if (entry.0 - goal).abs() < (best.0 - goal).abs() {
            best = *entry;
        }
    }
    best.1
}

/// Raw-pixel spacing scale used for width/height, padding, and item spacing.
/// Tops out at 384px; anything beyond that escapes to inline styles.
const SPACING_PX: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (14.0, "3.5"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (28.0, "7"),
    (32.0, "8"),
    (36.0, "9"),
    (40.0, "10"),
    (44.0, "11"),
    (48.0, "12"),
    (56.0, "14"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
    (112.0, "28"),
    (128.0, "32"),
    (144.0, "36"),
    (160.0, "40"),
    (176.0, "44"),
    (192.0, "48"),
    (208.0, "52"),
    (224.0, "56"),
    (240.0, "60"),
    (256.0, "64"),
    (288.0, "72"),
    (320.0, "80"),
    (384.0, "96"),
];

/// Hard ceiling of the spacing scale; larger sizes fall back to inline px.
pub const SPACING_CEILING_PX: f64 = 384.0;

pub fn px_to_layout_size(px: f64) -> &'static str {
    snap(px, SPACING_PX)
}

/// Font-size scale, keyed in rem (`px / 16`).
const FONT_SIZE_REM: &[(f64, &str)] = &[
    (0.75, "xs"),
    (0.875, "sm"),
    (1.0, "base"),
    (1.125, "lg"),
    (1.25, "xl"),
    (1.5, "2xl"),
    (1.875, "3xl"),
    (2.25, "4xl"),
    (3.0, "5xl"),
    (3.75, "6xl"),
    (4.5, "7xl"),
    (6.0, "8xl"),
    (8.0, "9xl"),
];

pub fn px_to_font_size(px: f64) -> &'static str {
    snap(px / 16.0, FONT_SIZE_REM)
}

/// Border-radius scale, keyed in rem. The empty suffix is the plain
/// `rounded` class; the oversized `full` key captures pill shapes.
const BORDER_RADIUS_REM: &[(f64, &str)] = &[
    (0.0, "none"),
    (0.125, "sm"),
    (0.25, ""),
    (0.375, "md"),
    (0.5, "lg"),
    (0.75, "xl"),
    (1.0, "2xl"),
    (1.5, "3xl"),
    (10.0, "full"),
];

pub fn px_to_border_radius(px: f64) -> &'static str {
    snap(px / 16.0, BORDER_RADIUS_REM)
}

/// Letter-spacing scale, keyed in em.
const LETTER_SPACING_EM: &[(f64, &str)] = &[
    (-0.05, "tighter"),
    (-0.025, "tight"),
    (0.0, "normal"),
    (0.025, "wide"),
    (0.05, "wider"),
    (0.1, "widest"),
];

pub fn em_to_letter_spacing(em: f64) -> &'static str {
    snap(em, LETTER_SPACING_EM)
}

/// Fixed line-height scale, keyed in rem.
const LINE_HEIGHT_REM: &[(f64, &str)] = &[
    (0.75, "3"),
    (1.0, "4"),
    (1.25, "5"),
    (1.5, "6"),
    (1.75, "7"),
    (2.0, "8"),
    (2.25, "9"),
    (2.5, "10"),
];

pub fn px_to_line_height(px: f64) -> &'static str {
    snap(px / 16.0, LINE_HEIGHT_REM)
}

/// Relative line-height scale, keyed in percent of the font size.
const LINE_HEIGHT_PERCENT: &[(f64, &str)] = &[
    (100.0, "none"),
    (125.0, "tight"),
    (137.5, "snug"),
    (150.0, "normal"),
    (162.5, "relaxed"),
    (200.0, "loose"),
];

pub fn percent_to_line_height(percent: f64) -> &'static str {
    snap(percent, LINE_HEIGHT_PERCENT)
}

/// Opacity 100% is the default and never emitted, so the table stops at 95.
pub fn opacity_class(opacity: f64) -> Option<String> {
    if opacity == 1.0 {
        return None;
    }
    let mut candidates = Vec::with_capacity(20);
    let mut v = 0.0;
    while v <= 95.0 {
        candidates.push(v);
        v += 5.0;
    }
    let snapped = figwind_scene::geometry::nearest_value(opacity * 100.0, &candidates);
    Some(format!("opacity-{}", snapped as i64))
}

const ROTATIONS_DEG: &[f64] = &[
    -180.0, -90.0, -45.0, -12.0, -6.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 6.0, 12.0, 45.0, 90.0,
    180.0,
];

/// Rotation class, or nothing when the angle rounds to zero. The angle is
/// normalized into [-180, 180] first, which the candidate list expects.
/// The host counts positive rotation counter-clockwise while CSS rotates
/// clockwise, so the sign flips before snapping.
pub fn rotation_classes(degrees: f64) -> Vec<String> {
    let mut normalized = degrees % 360.0;
    if normalized > 180.0 {
        normalized -= 360.0;
    } else if normalized < -180.0 {
        normalized += 360.0;
    }
    if normalized.round() == 0.0 {
        return Vec::new();
    }
    let snapped = figwind_scene::geometry::nearest_value(-normalized, ROTATIONS_DEG);
    let token = if snapped < 0.0 {
        format!("-rotate-{}", -snapped as i64)
    } else {
        format!("rotate-{}", snapped as i64)
    };
    vec!["transform".into(), token]
}

/// Border width snaps to {1, 2, 4, 8}; exactly 1 is the bare `border`.
pub fn border_width_class(weight: f64) -> String {
    let snapped = figwind_scene::geometry::nearest_value(weight, &[1.0, 2.0, 4.0, 8.0]);
    if snapped == 1.0 {
        "border".into()
    } else {
        format!("border-{}", snapped as i64)
    }
}

/// Responsive fractions of the parent content box, checked in this order
/// with an absolute ratio tolerance of 0.01. First match wins.
pub const FRACTIONS: &[(f64, &str)] = &[
    (1.0, "full"),
    (1.0 / 2.0, "1/2"),
    (1.0 / 3.0, "1/3"),
    (2.0 / 3.0, "2/3"),
    (1.0 / 4.0, "1/4"),
    (3.0 / 4.0, "3/4"),
    (1.0 / 5.0, "1/5"),
    (1.0 / 6.0, "1/6"),
    (5.0 / 6.0, "5/6"),
];

pub const FRACTION_TOLERANCE: f64 = 0.01;

/// Format a pixel measurement without trailing zeros (`12`, `12.5`).
pub fn fmt_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Spacing / size snapping
    // =========================================================================

    #[test]
    fn test_layout_size_exact() {
        assert_eq!(px_to_layout_size(16.0), "4");
        assert_eq!(px_to_layout_size(384.0), "96");
    }

    #[test]
    fn test_layout_size_snaps() {
        // 15 is equidistant from 14 and 16; the earlier entry wins.
        assert_eq!(px_to_layout_size(15.0), "3.5");
        assert_eq!(px_to_layout_size(1.4), "px");
    }

    // =========================================================================
    // Opacity
    // =========================================================================

    #[test]
    fn test_opacity_full_is_omitted() {
        assert_eq!(opacity_class(1.0), None);
    }

    #[test]
    fn test_opacity_097_snaps_to_95() {
        assert_eq!(opacity_class(0.97).as_deref(), Some("opacity-95"));
    }

    #[test]
    fn test_opacity_half() {
        assert_eq!(opacity_class(0.5).as_deref(), Some("opacity-50"));
    }

    // =========================================================================
    // Rotation
    // =========================================================================

    #[test]
    fn test_rotation_zero_omitted() {
        assert!(rotation_classes(0.0).is_empty());
        assert!(rotation_classes(0.4).is_empty());
        assert!(rotation_classes(360.0).is_empty());
    }

    #[test]
    fn test_rotation_sign_flips_for_css() {
        // Counter-clockwise host rotation renders as a clockwise-negative
        // CSS class.
        assert_eq!(rotation_classes(45.0), vec!["transform", "-rotate-45"]);
    }

    #[test]
    fn test_rotation_positive() {
        assert_eq!(rotation_classes(44.0), vec!["transform", "-rotate-45"]);
    }

    #[test]
    fn test_rotation_negative() {
        assert_eq!(rotation_classes(-80.0), vec!["transform", "rotate-90"]);
    }

    #[test]
    fn test_rotation_normalizes_wide_angles() {
        assert_eq!(rotation_classes(270.0), vec!["transform", "rotate-90"]);
    }

    // =========================================================================
    // Borders
    // =========================================================================

    #[test]
    fn test_border_one_is_bare() {
        assert_eq!(border_width_class(1.0), "border");
    }

    #[test]
    fn test_border_three_snaps_to_two() {
        assert_eq!(border_width_class(3.0), "border-2");
    }

    #[test]
    fn test_border_six_snaps_down() {
        // 6 is equidistant from 4 and 8; the earlier candidate wins.
        assert_eq!(border_width_class(6.0), "border-4");
    }

    // =========================================================================
    // Text scales
    // =========================================================================

    #[test]
    fn test_font_size_base() {
        assert_eq!(px_to_font_size(16.0), "base");
        assert_eq!(px_to_font_size(14.0), "sm");
        assert_eq!(px_to_font_size(30.0), "3xl");
    }

    #[test]
    fn test_border_radius() {
        assert_eq!(px_to_border_radius(4.0), "");
        assert_eq!(px_to_border_radius(8.0), "lg");
        assert_eq!(px_to_border_radius(9999.0), "full");
    }

    #[test]
    fn test_line_height() {
        assert_eq!(px_to_line_height(24.0), "6");
        assert_eq!(percent_to_line_height(150.0), "normal");
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    #[test]
    fn test_fmt_px() {
        assert_eq!(fmt_px(12.0), "12");
        assert_eq!(fmt_px(12.5), "12.5");
        assert_eq!(fmt_px(12.004), "12");
    }
}

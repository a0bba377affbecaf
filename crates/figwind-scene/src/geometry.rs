//! Pure geometry helpers: affine application, rotated bounding boxes,
//! nearest-value snapping, interval statistics.

use crate::types::Mat2x3;

/// Apply a 2×3 affine transform to a point.
pub fn apply_transform(matrix: &Mat2x3, point: (f64, f64)) -> (f64, f64) {
    let (x, y) = point;
    (
        x * matrix[0][0] + y * matrix[0][1] + matrix[0][2],
        x * matrix[1][0] + y * matrix[1][1] + matrix[1][2],
    )
}

/// Top-left corner of the axis-aligned bounding box of a rotated node.
///
/// Builds a center-anchored matrix from the node's absolute transform and
/// half extents, pushes the four canonical corner offsets
/// `(±half_width, ±half_height)` through it, and returns the minimum x/y.
pub fn rotated_bounding_rect(
    absolute_transform: &Mat2x3,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    let [[c0, s0, x], [s1, c1, y]] = *absolute_transform;
    let matrix: Mat2x3 = [
        [c0, s0, x + half_width * c0 + half_height * s0],
        [s1, c1, y + half_width * s1 + half_height * c1],
    ];

    let corners = [
        (half_width, half_height),
        (-half_width, -half_height),
        (half_width, -half_height),
        (-half_width, half_height),
    ];

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for corner in corners {
        let (cx, cy) = apply_transform(&matrix, corner);
        min_x = min_x.min(cx);
        min_y = min_y.min(cy);
    }

    (min_x, min_y)
}

/// The candidate closest to `goal`. On equal distance the earlier candidate
/// wins, which keeps snapping deterministic across table entries.
pub fn nearest_value(goal: f64, candidates: &[f64]) -> f64 {
    candidates
        .iter()
        .copied()
        .reduce(|prev, curr| {
            if (curr - goal).abs() < (prev - goal).abs() {
                curr
            } else {
                prev
            }
        })
        .unwrap_or(goal)
}

/// Arithmetic mean. Returns NaN on empty input; callers must guard.
pub fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

//! Auto-layout inference.
//!
//! Reconstructs a flex layout (direction, spacing, padding, alignment,
//! per-child stretch) for a container that only has absolutely positioned
//! children. The thresholds here are empirically tuned and pinned by tests;
//! changing them changes visual output on real scenes.

use figwind_scene::geometry::average;
use figwind_scene::types::{
    CounterAlign, LayoutAlign, LayoutMode, Padding, PrimaryAlign, SceneNode, SizingMode,
};

/// Slight visual overlap between siblings still counts as a gap.
const GAP_THRESHOLD: f64 = -2.0;

/// Center-offset classification window for alignment inference.
const ALIGN_THRESHOLD: f64 = 4.0;

/// Slack when comparing a child's cross-axis size against the parent's
/// content box for the stretch decision.
const STRETCH_TOLERANCE: f64 = 2.0;

/// Infer an auto-layout for `node` if it is a container without one.
pub fn convert_to_auto_layout(node: &mut SceneNode) {
    let width = node.layout.width;
    let height = node.layout.height;
    let Some(container) = node.container_mut() else {
        return;
    };
    if container.layout_mode != LayoutMode::None || container.children.is_empty() {
        return;
    }

    let (direction, avg_gap) = detect_direction(&container.children);
    match direction {
        LayoutMode::None if container.children.len() >= 2 => {
            // No single flex direction fits; emit children absolutely
            // positioned. Child order is left untouched in this branch.
            container.is_relative = true;
            return;
        }
        LayoutMode::None => {
            // Degenerate single-child wrapper, solely so padding inference
            // has a frame to attach to.
            container.layout_mode = LayoutMode::Horizontal;
            container.item_spacing = 0.0;
        }
        mode => {
            match mode {
                LayoutMode::Vertical => container
                    .children
                    .sort_by(|a, b| a.layout.y.total_cmp(&b.layout.y)),
                _ => container
                    .children
                    .sort_by(|a, b| a.layout.x.total_cmp(&b.layout.x)),
            }
            container.layout_mode = mode;
            container.item_spacing = avg_gap.max(0.0);
        }
    }

    container.padding = detect_padding(
        &container.children,
        container.layout_mode,
        width,
        height,
    );

    for child in &mut container.children {
        child.layout_align = stretch_or_inherit(
            child,
            container.layout_mode,
            &container.padding,
            width,
            height,
        );
        // Inference never hands out grow; full-bleed nodes get it elsewhere.
        child.layout_grow = 0.0;
    }

    let (primary, counter) = detect_alignment(
        &container.children,
        container.layout_mode,
        width,
        height,
    );
    container.primary_axis_align_items = primary;
    container.counter_axis_align_items = counter;

    // The container's own size stays authoritative once a layout is applied.
    container.primary_axis_sizing_mode = SizingMode::Fixed;
    container.counter_axis_sizing_mode = SizingMode::Fixed;
}

/// Decide the flex direction from pairwise gaps between sorted children.
///
/// Returns the direction plus the average gap along it, which becomes the
/// item-spacing candidate.
pub fn detect_direction(children: &[SceneNode]) -> (LayoutMode, f64) {
    if children.len() < 2 {
        return (LayoutMode::None, 0.0);
    }

    let y_gaps = axis_gaps(children, |n| (n.layout.y, n.layout.height));
    let x_gaps = axis_gaps(children, |n| (n.layout.x, n.layout.width));

    let all_y = y_gaps.iter().all(|g| *g >= GAP_THRESHOLD);
    let all_x = x_gaps.iter().all(|g| *g >= GAP_THRESHOLD);
    let avg_y = average(&y_gaps);
    let avg_x = average(&x_gaps);

    if !all_y && !all_x {
        // Overlap on both axes; fall back to whichever average looks more
        // like a real gap.
        if avg_y > GAP_THRESHOLD && avg_x <= GAP_THRESHOLD {
            (LayoutMode::Vertical, avg_y)
        } else if avg_x > GAP_THRESHOLD {
            (LayoutMode::Horizontal, avg_x)
        } else {
            (LayoutMode::None, 0.0)
        }
    } else if !all_y {
        (LayoutMode::Horizontal, avg_x)
    } else {
        (LayoutMode::Vertical, avg_y)
    }
}

fn axis_gaps(children: &[SceneNode], key: impl Fn(&SceneNode) -> (f64, f64)) -> Vec<f64> {
    let mut sorted: Vec<(f64, f64)> = children.iter().map(&key).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    sorted
        .windows(2)
        .map(|pair| pair[1].0 - (pair[0].0 + pair[0].1))
        .collect()
}

/// Infer the four paddings from the children's extents, floored at zero.
pub fn detect_padding(
    children: &[SceneNode],
    mode: LayoutMode,
    width: f64,
    height: f64,
) -> Padding {
    let padding = if children.len() == 1 {
        let child = &children[0];
        Padding {
            left: child.layout.x,
            top: child.layout.y,
            right: width - (child.layout.x + child.layout.width),
            bottom: height - (child.layout.y + child.layout.height),
        }
    } else {
        let first = &children[0];
        let last = &children[children.len() - 1];
        let min = |f: &dyn Fn(&SceneNode) -> f64| {
            children
                .iter()
                .map(f)
                .fold(f64::INFINITY, f64::min)
        };
        match mode {
            LayoutMode::Vertical => Padding {
                top: first.layout.y,
                bottom: height - (last.layout.y + last.layout.height),
                left: min(&|c| c.layout.x),
                right: min(&|c| width - (c.layout.x + c.layout.width)),
            },
            _ => Padding {
                left: first.layout.x,
                right: width - (last.layout.x + last.layout.width),
                top: min(&|c| c.layout.y),
                bottom: min(&|c| height - (c.layout.y + c.layout.height)),
            },
        }
    };

    Padding {
        left: padding.left.max(0.0),
        right: padding.right.max(0.0),
        top: padding.top.max(0.0),
        bottom: padding.bottom.max(0.0),
    }
}

fn stretch_or_inherit(
    child: &SceneNode,
    mode: LayoutMode,
    padding: &Padding,
    width: f64,
    height: f64,
) -> LayoutAlign {
    let stretches = match mode {
        LayoutMode::Vertical => {
            child.layout.width > width - padding.left - padding.right - STRETCH_TOLERANCE
        }
        _ => child.layout.height > height - padding.top - padding.bottom - STRETCH_TOLERANCE,
    };
    if stretches {
        LayoutAlign::Stretch
    } else {
        LayoutAlign::Inherit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Min,
    Center,
    Max,
}

fn classify_offset(offset: f64) -> Bucket {
    if offset < -ALIGN_THRESHOLD {
        Bucket::Min
    } else if offset > ALIGN_THRESHOLD {
        Bucket::Max
    } else {
        Bucket::Center
    }
}

/// Most frequent classification across children. On a frequency tie the
/// last-encountered value wins (stable ascending sort, take the last entry);
/// an accepted quirk that real fixtures depend on.
fn most_frequent(buckets: &[Bucket]) -> Bucket {
    let mut entries: Vec<(Bucket, usize)> = Vec::new();
    for bucket in buckets {
        match entries.iter_mut().find(|(value, _)| value == bucket) {
            Some(entry) => entry.1 += 1,
            None => entries.push((*bucket, 1)),
        }
    }
    entries.sort_by_key(|entry| entry.1);
    entries.last().map(|entry| entry.0).unwrap_or(Bucket::Min)
}

fn detect_alignment(
    children: &[SceneNode],
    mode: LayoutMode,
    width: f64,
    height: f64,
) -> (PrimaryAlign, CounterAlign) {
    let mut x_buckets = Vec::with_capacity(children.len());
    let mut y_buckets = Vec::with_capacity(children.len());
    for child in children {
        let center_x = child.layout.x + child.layout.width / 2.0;
        let center_y = child.layout.y + child.layout.height / 2.0;
        x_buckets.push(classify_offset(center_x - width / 2.0));
        y_buckets.push(classify_offset(center_y - height / 2.0));
    }

    let (primary_buckets, counter_buckets) = match mode {
        LayoutMode::Vertical => (y_buckets, x_buckets),
        _ => (x_buckets, y_buckets),
    };

    let primary = match most_frequent(&primary_buckets) {
        Bucket::Min => PrimaryAlign::Min,
        Bucket::Center => PrimaryAlign::Center,
        Bucket::Max => PrimaryAlign::Max,
    };
    let counter = match most_frequent(&counter_buckets) {
        Bucket::Min => CounterAlign::Min,
        Bucket::Center => CounterAlign::Center,
        Bucket::Max => CounterAlign::Max,
    };
    (primary, counter)
}

//! Straight strokes

use crate::brush::BrushSpec;
use crate::input::PointerSample;

use super::{Shape, ShapeKind};

/// Stroke width for a brush size
pub fn line_width(size: f32) -> f32 {
    (size / 8.0).max(1.0)
}

/// A round-capped stroke between two samples.
///
/// Coincident endpoints degrade to a dot of the stroke width.
pub fn line(from: Option<&PointerSample>, to: Option<&PointerSample>, spec: &BrushSpec) -> Vec<Shape> {
    let (Some(from), Some(to)) = (from, to) else {
        return Vec::new();
    };
    let (from, to) = (from.position, to.position);
    if !from.is_finite() || !to.is_finite() {
        return Vec::new();
    }

    let width = line_width(spec.size);
    let kind = if from == to {
        ShapeKind::Circle {
            center: from,
            radius: width / 2.0,
        }
    } else {
        ShapeKind::Line { from, to, width }
    };
    vec![Shape::new(kind, spec.color)]
}

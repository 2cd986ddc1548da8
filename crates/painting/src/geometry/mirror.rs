//! Outlines reflected across the gesture axis

use glam::Vec2;

use crate::color::Color;

use super::{Shape, ShapeKind};

/// Fill the recorded outline and its reflection across the start→end axis.
///
/// Each point is decomposed into a base along the axis and a height across
/// it; the two shapes use `(base, height)` and `(base, -height)` in the
/// axis-aligned frame and share the start vertex.
pub fn mirror(points: &[Vec2], color: Color) -> Vec<Shape> {
    let (Some(&start), Some(&end)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let axis = end - start;
    if points.len() < 2 || axis == Vec2::ZERO || !axis.is_finite() {
        return Vec::new();
    }
    let frame = Vec2::from_angle(axis.y.atan2(axis.x));

    let mut upper = Vec::with_capacity(points.len());
    let mut lower = Vec::with_capacity(points.len());
    for &point in points {
        let offset = point - start;
        let length = offset.length();
        let angle = axis.perp_dot(offset).atan2(axis.dot(offset));
        let height = length * angle.sin();
        let base = (length * length - height * height).max(0.0).sqrt();
        let base = if angle.cos() < 0.0 { -base } else { base };

        upper.push(start + frame.rotate(Vec2::new(base, height)));
        lower.push(start + frame.rotate(Vec2::new(base, -height)));
    }

    vec![
        Shape::new(ShapeKind::Polygon(upper), color),
        Shape::new(ShapeKind::Polygon(lower), color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(shape: &Shape) -> &[Vec2] {
        match &shape.kind {
            ShapeKind::Polygon(points) => points,
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_reflects_across_axis() {
        let points = [Vec2::ZERO, Vec2::new(5.0, 3.0), Vec2::new(10.0, 0.0)];
        let shapes = mirror(&points, Color::BLACK);
        assert_eq!(shapes.len(), 2);

        let upper = polygon(&shapes[0]);
        let lower = polygon(&shapes[1]);
        assert_eq!(upper[0], Vec2::ZERO);
        assert_eq!(lower[0], Vec2::ZERO);
        assert!((upper[1] - Vec2::new(5.0, 3.0)).length() < 1e-4);
        assert!((lower[1] - Vec2::new(5.0, -3.0)).length() < 1e-4);
    }

    #[test]
    fn test_reflection_on_diagonal_axis() {
        let points = [Vec2::ZERO, Vec2::new(0.0, 4.0), Vec2::new(4.0, 4.0)];
        let shapes = mirror(&points, Color::BLACK);
        let lower = polygon(&shapes[1]);
        // (0, 4) reflected across y = x
        assert!((lower[1] - Vec2::new(4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_point_behind_start_keeps_sign() {
        let points = [Vec2::ZERO, Vec2::new(-3.0, 2.0), Vec2::new(10.0, 0.0)];
        let shapes = mirror(&points, Color::BLACK);
        assert!((polygon(&shapes[0])[1] - Vec2::new(-3.0, 2.0)).length() < 1e-4);
    }

    #[test]
    fn test_degenerate_axis_draws_nothing() {
        let points = [Vec2::ONE, Vec2::new(4.0, 4.0), Vec2::ONE];
        assert!(mirror(&points, Color::BLACK).is_empty());
        assert!(mirror(&[], Color::BLACK).is_empty());
    }
}

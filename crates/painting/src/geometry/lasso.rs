//! Filled freehand outlines

use glam::Vec2;

use crate::color::Color;

use super::{Shape, ShapeKind};

/// Fill the outline through `points`: start, every interior sample, end.
///
/// Fewer than three points enclose no area and draw nothing.
pub fn lasso(points: &[Vec2], color: Color) -> Vec<Shape> {
    if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }
    vec![Shape::new(ShapeKind::Polygon(points.to_vec()), color)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_keeps_recording_order() {
        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(5.0, 8.0), Vec2::new(1.0, 3.0)];
        let shapes = lasso(&points, Color::BLACK);
        assert_eq!(shapes[0].kind, ShapeKind::Polygon(points.to_vec()));
    }

    #[test]
    fn test_too_few_points() {
        assert!(lasso(&[Vec2::ZERO, Vec2::ONE], Color::BLACK).is_empty());
    }
}

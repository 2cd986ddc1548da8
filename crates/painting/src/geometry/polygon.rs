//! N-gons from the most spread-out recorded points

use glam::Vec2;

use crate::color::Color;

use super::{Shape, ShapeKind};

/// Fewest sides a polygon tool can draw
const MIN_SIDES: usize = 3;

/// Choose `sides` vertex indices by farthest-point selection.
///
/// The first and last points are always chosen. Each further vertex is
/// the unchosen interior point with the greatest summed distance to every
/// vertex chosen so far; ties go to the lowest index. The result is sorted
/// by recording order. Returns `None` when there are fewer points than
/// sides.
pub fn select_vertices(points: &[Vec2], sides: usize) -> Option<Vec<usize>> {
    let sides = sides.max(MIN_SIDES);
    if points.len() < sides {
        return None;
    }

    let last = points.len() - 1;
    let mut chosen = vec![0, last];
    while chosen.len() < sides {
        let mut best: Option<(usize, f32)> = None;
        // Every pass rescans all interior points
        for index in 1..last {
            if chosen.contains(&index) {
                continue;
            }
            let score: f32 = chosen.iter().map(|&c| points[index].distance(points[c])).sum();
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        match best {
            Some((index, _)) => chosen.push(index),
            None => break,
        }
    }

    chosen.sort_unstable();
    Some(chosen)
}

/// Fill an N-gon through the selected recorded points.
///
/// With too few points, an equilateral triangle is built on the
/// start→end edge instead.
pub fn polygon(points: &[Vec2], sides: usize, color: Color) -> Vec<Shape> {
    if points.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }
    let outline = match select_vertices(points, sides) {
        Some(indices) => indices.into_iter().map(|i| points[i]).collect(),
        None => match (points.first(), points.last()) {
            (Some(&start), Some(&end)) if start != end => fallback_triangle(start, end),
            _ => return Vec::new(),
        },
    };
    vec![Shape::new(ShapeKind::Polygon(outline), color)]
}

/// Equilateral triangle with `start`→`end` as one edge
fn fallback_triangle(start: Vec2, end: Vec2) -> Vec<Vec2> {
    let edge = end - start;
    let apex = (start + end) / 2.0 + edge.perp() * (3.0_f32.sqrt() / 2.0);
    vec![start, end, apex]
}

//! Ramer–Douglas–Peucker path simplification

use glam::Vec2;

/// Drop points that deviate from the chord by no more than `epsilon`.
///
/// The point farthest from the chord between the first and last points is
/// kept if its distance exceeds `epsilon`, and both halves are simplified
/// recursively. Otherwise only the two endpoints remain.
pub fn simplify(points: &[Vec2], epsilon: f32) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];

    let mut farthest = 0;
    let mut max_distance = 0.0;
    for (index, &point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let distance = distance_to_chord(point, first, last);
        if distance > max_distance {
            max_distance = distance;
            farthest = index;
        }
    }

    if max_distance > epsilon {
        let mut left = simplify(&points[..=farthest], epsilon);
        let right = simplify(&points[farthest..], epsilon);
        // The split point ends `left` and starts `right`
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Perpendicular distance from `point` to the line through `a` and `b`
fn distance_to_chord(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let chord = b - a;
    let length = chord.length();
    if length == 0.0 {
        return point.distance(a);
    }
    chord.perp_dot(point - a).abs() / length
}

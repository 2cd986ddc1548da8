//! Ribbon segments for the freehand brush
//!
//! A segment between two samples is split into steps. Each step has a
//! noise-placed midpoint and is drawn as two quads (start half and end
//! half) whose edges sit perpendicular to the interpolated pen angle.
//! All randomness is seeded from the position relative to the stroke
//! origin, so a translated recording yields translated geometry.

use glam::Vec2;

use crate::brush::{BrushSpec, lerp, map_range};
use crate::input::PointerSample;
use crate::noise::{noise, signed_noise};

use super::{Shape, ShapeKind};

/// Jitter applied to interior vertices at full variation, as a fraction of size
const JITTER_SCALE: f32 = 0.15;

/// Seed stride between consecutive steps
const STEP_STRIDE: f32 = 13.0;

// Noise channels
const MIDPOINT: u32 = 2;
const CULL_START: u32 = 3;
const CULL_END: u32 = 4;
const JITTER_EDGE: u32 = 5;
const JITTER_MID: u32 = 9;

/// Number of steps a segment is split into for a brush size
pub fn ribbon_steps(size: f32) -> usize {
    (map_range(size, 10.0, 300.0, 10.0, 200.0).floor() as usize).max(1)
}

/// Build the ribbon segment from `start` to `end`.
///
/// `origin` is the first sample of the stroke. Returns nothing when the
/// two samples coincide.
pub fn ribbon(start: &PointerSample, end: &PointerSample, origin: Vec2, spec: &BrushSpec) -> Vec<Shape> {
    let (p0, p1) = (start.position, end.position);
    if p0 == p1 || !p0.is_finite() || !p1.is_finite() {
        return Vec::new();
    }

    let direction = p1 - p0;
    let travel = direction.y.atan2(direction.x);
    let a0 = start.angle.unwrap_or(travel);
    let a1 = end.angle.unwrap_or(travel);
    let (w0, w1) = (start.pressure_or_default(), end.pressure_or_default());

    let rel = p0 - origin;
    let base_seed = rel.x * 3.0 + rel.y * 5.0;
    let steps = ribbon_steps(spec.size);
    let jitter = spec.variation * spec.size * JITTER_SCALE;

    // Cross-section at fraction `t` of the segment
    let edge = |t: f32, seed: f32, channel: u32, pinned: bool| -> (Vec2, Vec2) {
        let center = p0.lerp(p1, t);
        let normal = Vec2::from_angle(lerp_angle(a0, a1, t)).perp();
        let half = half_width(spec.size, lerp(w0, w1, t));
        let mut left = center + normal * half;
        let mut right = center - normal * half;
        if !pinned && jitter > 0.0 {
            left += jitter_offset(seed, channel, jitter);
            right += jitter_offset(seed, channel + 2, jitter);
        }
        (left, right)
    };

    let boundaries: Vec<(Vec2, Vec2)> = (0..=steps)
        .map(|j| {
            let t = j as f32 / steps as f32;
            let seed = base_seed + j as f32 * STEP_STRIDE;
            edge(t, seed, JITTER_EDGE, j == 0 || j == steps)
        })
        .collect();

    let mut shapes = Vec::with_capacity(steps * 2);
    for i in 0..steps {
        let seed = base_seed + i as f32 * STEP_STRIDE;
        let fraction = 0.25 + 0.5 * noise(seed, MIDPOINT);
        let t = (i as f32 + fraction) / steps as f32;
        let mid = edge(t, seed, JITTER_MID, false);
        let pressure = lerp(w0, w1, t);

        let (start_left, start_right) = boundaries[i];
        let (end_left, end_right) = boundaries[i + 1];

        if noise(seed, CULL_START) < pressure * 4.0 {
            shapes.push(Shape::new(
                ShapeKind::Polygon(vec![start_left, mid.0, mid.1, start_right]),
                spec.color.vary(seed, spec.variation),
            ));
        }
        if noise(seed, CULL_END) < pressure * 4.0 {
            shapes.push(Shape::new(
                ShapeKind::Polygon(vec![mid.0, end_left, end_right, mid.1]),
                spec.color.vary(seed + 1.0, spec.variation),
            ));
        }
    }
    shapes
}

/// Half the ribbon width at `pressure`
fn half_width(size: f32, pressure: f32) -> f32 {
    size / 2.0 * map_range(pressure, 0.0, 0.3, 0.3, 2.0)
}

fn jitter_offset(seed: f32, channel: u32, scale: f32) -> Vec2 {
    Vec2::new(signed_noise(seed, channel), signed_noise(seed, channel + 1)) * scale
}

/// Interpolate angles along the shorter arc
fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let delta = (to - from + PI).rem_euclid(TAU) - PI;
    lerp(from, from + delta, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gouache_ipc::{PointerPhase, Tool};

    fn sample(x: f32, y: f32, pressure: f32) -> PointerSample {
        PointerSample::at(Vec2::new(x, y), PointerPhase::Move).with_pressure(pressure)
    }

    fn spec(size: f32, variation: f32) -> BrushSpec {
        BrushSpec {
            tool: Tool::Brush,
            size,
            variation,
            ..BrushSpec::default()
        }
    }

    fn bounds(shapes: &[Shape]) -> (Vec2, Vec2) {
        shapes.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), shape| {
                let (lo, hi) = shape.bounds();
                (min.min(lo), max.max(hi))
            },
        )
    }

    #[test]
    fn test_steps_by_size() {
        assert_eq!(ribbon_steps(4.0), 10);
        assert_eq!(ribbon_steps(10.0), 10);
        assert_eq!(ribbon_steps(20.0), 16);
        assert_eq!(ribbon_steps(300.0), 200);
    }

    #[test]
    fn test_coincident_endpoints_draw_nothing() {
        let a = sample(10.0, 10.0, 0.5);
        assert!(ribbon(&a, &a, a.position, &spec(20.0, 0.5)).is_empty());
    }

    #[test]
    fn test_full_pressure_draws_two_halves_per_step() {
        let spec = spec(20.0, 0.5);
        let shapes = ribbon(&sample(100.0, 100.0, 0.5), &sample(150.0, 100.0, 0.5), Vec2::splat(100.0), &spec);
        // pressure · 4 ≥ 1, so nothing is culled
        assert_eq!(shapes.len(), 2 * ribbon_steps(20.0));
    }

    #[test]
    fn test_low_pressure_culls_some_halves() {
        let spec = spec(300.0, 0.0);
        let shapes = ribbon(&sample(0.0, 0.0, 0.05), &sample(200.0, 0.0, 0.05), Vec2::ZERO, &spec);
        assert!(shapes.len() < 2 * ribbon_steps(300.0));
    }

    #[test]
    fn test_segment_bounds() {
        let spec = spec(20.0, 1.0);
        let shapes = ribbon(&sample(100.0, 100.0, 0.5), &sample(200.0, 100.0, 0.5), Vec2::splat(100.0), &spec);
        let (min, max) = bounds(&shapes);
        let half = half_width(20.0, 0.5);
        let slack = 20.0 * JITTER_SCALE;
        assert!(min.x >= 100.0 - slack && max.x <= 200.0 + slack);
        assert!(min.y >= 100.0 - half - slack && max.y <= 100.0 + half + slack);
        assert!(max.x - min.x >= 99.0);
    }

    #[test]
    fn test_endpoints_are_not_jittered() {
        let spec = spec(40.0, 1.0);
        let shapes = ribbon(&sample(0.0, 0.0, 1.0), &sample(80.0, 0.0, 1.0), Vec2::ZERO, &spec);
        let half = half_width(40.0, 1.0);
        match &shapes[0].kind {
            ShapeKind::Polygon(points) => {
                assert!((points[0] - Vec2::new(0.0, half)).length() < 1e-4);
                assert!((points[3] - Vec2::new(0.0, -half)).length() < 1e-4);
            }
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_translation_moves_geometry() {
        let spec = spec(8.0, 0.8);
        let origin = Vec2::new(140.5, 150.25);
        let a = sample(150.5, 160.25, 0.4);
        let b = sample(190.75, 171.5, 0.6);
        let base = ribbon(&a, &b, origin, &spec);

        let delta = Vec2::new(20.0, -9.0);
        let mut a2 = a;
        let mut b2 = b;
        a2.translate(delta);
        b2.translate(delta);
        let moved = ribbon(&a2, &b2, origin + delta, &spec);

        assert_eq!(base.len(), moved.len());
        for (x, y) in base.iter().zip(&moved) {
            assert_eq!(x.color, y.color);
            match (&x.kind, &y.kind) {
                (ShapeKind::Polygon(p), ShapeKind::Polygon(q)) => {
                    for (u, v) in p.iter().zip(q) {
                        assert!((*v - *u - delta).abs().max_element() < 1e-3);
                    }
                }
                other => panic!("unexpected shapes {:?}", other),
            }
        }
    }

    #[test]
    fn test_lerp_angle_takes_short_arc() {
        use std::f32::consts::TAU;
        let mid = lerp_angle(TAU - 0.1, 0.1, 0.5);
        assert!((mid.rem_euclid(TAU)).min(TAU - mid.rem_euclid(TAU)) < 1e-5);
    }
}

//! Single textured marks

use glam::Vec2;
use gouache_ipc::Texture;

use crate::brush::{BrushSpec, map_range};
use crate::constants::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::input::PointerSample;

use super::{Shape, ShapeKind};

/// Scale of the shadow drawn under a shaded mark
const SHADOW_SCALE: f32 = 1.05;

/// Luminance factor of the shadow
const SHADOW_DARKEN: f32 = 0.75;

/// Place one mark at `sample`.
///
/// `seed` picks the color variation for the mark; the pipeline passes the
/// sample index so a replay reproduces the same colors.
pub fn stamp(sample: &PointerSample, seed: f32, spec: &BrushSpec) -> Vec<Shape> {
    let center = sample.position;
    if !center.is_finite() {
        return Vec::new();
    }
    let pressure = sample.pressure_or_default();

    match spec.texture {
        Texture::Rounded => vec![capsule(center, sample.angle, pressure, seed, spec, 1.0)],
        Texture::Shaded => {
            let mut shadow = capsule(center, sample.angle, pressure, seed, spec, SHADOW_SCALE);
            shadow.color = shadow.color.darken(SHADOW_DARKEN);
            vec![shadow, capsule(center, sample.angle, pressure, seed, spec, 1.0)]
        }
        Texture::Rake => rake(center, sample.angle, pressure, spec),
    }
}

/// Rounded rectangle along the pen angle, narrowed by pressure
fn capsule(center: Vec2, angle: Option<f32>, pressure: f32, seed: f32, spec: &BrushSpec, scale: f32) -> Shape {
    let size = spec.size * scale;
    let (width, angle) = match angle {
        Some(angle) => (size * map_range(pressure, 0.0, 0.2, 0.1, 0.9), angle),
        None => (size, 0.0),
    };
    Shape::new(
        ShapeKind::RoundedRect {
            center,
            length: size,
            width,
            radius: size / 4.0,
            angle,
        },
        spec.color.vary(seed, spec.variation),
    )
}

/// Row of circles centered on the sample along the pen angle
fn rake(center: Vec2, angle: Option<f32>, pressure: f32, spec: &BrushSpec) -> Vec<Shape> {
    let count = rake_teeth(spec.size);
    let radius = spec.size / (2.0 * count as f32);
    let gap = map_range(pressure, 0.0, 0.2, 3.0, 0.0);
    let angle = angle.unwrap_or(0.0);
    let axis = Vec2::from_angle(angle);
    let spacing = 2.0 * radius + gap;
    let first = -(count as f32 - 1.0) / 2.0;
    let angle_seed = (angle * 10.0).round();

    (0..count)
        .map(|i| {
            let offset = (first + i as f32) * spacing;
            Shape::new(
                ShapeKind::Circle {
                    center: center + axis * offset,
                    radius,
                },
                spec.color.vary(i as f32 + angle_seed, spec.variation),
            )
        })
        .collect()
}

/// Number of rake circles for a brush size
pub(crate) fn rake_teeth(size: f32) -> usize {
    (map_range(size, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, 2.0, 12.0).floor() as usize).max(1)
}

//! Brush geometry generators
//!
//! Generators are pure: they read samples and a [`BrushSpec`] and return
//! colored [`Shape`]s. Nothing here touches a surface; the compositor
//! rasterizes whatever comes back. Missing endpoints produce no shapes.

mod lasso;
mod line;
mod mirror;
mod polygon;
mod ribbon;
mod simplify;
mod stamp;

use glam::Vec2;
use gouache_ipc::Tool;
use tracing::debug;

use crate::brush::{BrushSpec, Generator};
use crate::color::Color;
use crate::constants::SIMPLIFY_EPSILON;
use crate::input::PointerSample;

pub use lasso::lasso;
pub use line::{line, line_width};
pub use mirror::mirror;
pub use polygon::{polygon, select_vertices};
pub use ribbon::{ribbon, ribbon_steps};
pub use simplify::simplify;
pub use stamp::stamp;

/// Geometric primitive produced by a generator
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Closed filled polygon
    Polygon(Vec<Vec2>),
    /// Filled circle
    Circle { center: Vec2, radius: f32 },
    /// Filled rectangle with rounded corners, rotated about its center
    RoundedRect {
        center: Vec2,
        length: f32,
        width: f32,
        radius: f32,
        /// Rotation in radians of the length axis
        angle: f32,
    },
    /// Stroked segment with round caps
    Line { from: Vec2, to: Vec2, width: f32 },
}

/// A primitive and the color it is filled or stroked with
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Conservative axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match &self.kind {
            ShapeKind::Polygon(points) => points.iter().fold(
                (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
                |(min, max), p| (min.min(*p), max.max(*p)),
            ),
            ShapeKind::Circle { center, radius } => (*center - *radius, *center + *radius),
            ShapeKind::RoundedRect {
                center,
                length,
                width,
                angle,
                ..
            } => {
                let axis = Vec2::from_angle(*angle);
                let half = (axis * *length / 2.0).abs() + (axis.perp() * *width / 2.0).abs();
                (*center - half, *center + half)
            }
            ShapeKind::Line { from, to, width } => {
                let half = *width / 2.0;
                (from.min(*to) - half, from.max(*to) + half)
            }
        }
    }

    /// Same shape moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Shape {
        let kind = match &self.kind {
            ShapeKind::Polygon(points) => ShapeKind::Polygon(points.iter().map(|p| *p + delta).collect()),
            ShapeKind::Circle { center, radius } => ShapeKind::Circle {
                center: *center + delta,
                radius: *radius,
            },
            ShapeKind::RoundedRect {
                center,
                length,
                width,
                radius,
                angle,
            } => ShapeKind::RoundedRect {
                center: *center + delta,
                length: *length,
                width: *width,
                radius: *radius,
                angle: *angle,
            },
            ShapeKind::Line { from, to, width } => ShapeKind::Line {
                from: *from + delta,
                to: *to + delta,
                width: *width,
            },
        };
        Shape::new(kind, self.color)
    }
}

/// Generate the shapes for `samples` under `spec`.
///
/// Accumulating tools only produce geometry for samples at index `drawn`
/// and later (ribbons and lines also need the sample before). Redrawing
/// tools ignore `drawn` and return the whole shape.
pub fn synthesize(spec: &BrushSpec, samples: &[PointerSample], drawn: usize) -> Vec<Shape> {
    let Some(origin) = samples.first().map(|s| s.position) else {
        return Vec::new();
    };

    let shapes: Vec<Shape> = match spec.generator() {
        Generator::Stamp => samples
            .iter()
            .enumerate()
            .skip(drawn)
            .flat_map(|(index, sample)| stamp(sample, index as f32, spec))
            .collect(),
        Generator::Ribbon => segments(samples, drawn)
            .flat_map(|(start, end)| ribbon(start, end, origin, spec))
            .collect(),
        Generator::Line => match spec.tool {
            Tool::Line => line(samples.first(), samples.last(), spec),
            _ => segments(samples, drawn)
                .flat_map(|(start, end)| line(Some(start), Some(end), spec))
                .collect(),
        },
        Generator::Lasso => {
            let positions: Vec<Vec2> = samples.iter().map(|s| s.position).collect();
            let outline = match spec.tool {
                Tool::SmoothLasso => simplify(&positions, SIMPLIFY_EPSILON),
                _ => positions,
            };
            lasso(&outline, spec.color)
        }
        Generator::Mirror => {
            let positions: Vec<Vec2> = samples.iter().map(|s| s.position).collect();
            mirror(&positions, spec.color)
        }
        Generator::Polygon => {
            let sides = match spec.tool {
                Tool::Polygon { sides } => usize::from(sides),
                _ => 3,
            };
            let positions: Vec<Vec2> = samples.iter().map(|s| s.position).collect();
            polygon(&positions, sides, spec.color)
        }
    };

    debug!(
        "synthesize: tool={:?}, samples={}, drawn={}, shapes={}",
        spec.tool,
        samples.len(),
        drawn,
        shapes.len()
    );
    shapes
}

/// Consecutive sample pairs whose end index is at least `drawn`
fn segments(
    samples: &[PointerSample],
    drawn: usize,
) -> impl Iterator<Item = (&PointerSample, &PointerSample)> {
    samples
        .windows(2)
        .enumerate()
        .filter(move |(index, _)| index + 1 >= drawn)
        .map(|(_, pair)| (&pair[0], &pair[1]))
}

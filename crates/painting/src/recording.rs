//! Gesture recording
//!
//! The ordered samples of the current gesture. Appended while capturing,
//! translated in bulk while editing, and replayed to regenerate a stroke.

use glam::Vec2;
use gouache_ipc::Bounds;

use crate::input::PointerSample;

/// Ordered samples of the gesture that owns the active surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeRecording {
    samples: Vec<PointerSample>,
}

impl StrokeRecording {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample in arrival order
    #[inline]
    pub fn push(&mut self, sample: PointerSample) {
        self.samples.push(sample);
    }

    /// Shift every sample by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        for sample in &mut self.samples {
            sample.translate(delta);
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&PointerSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&PointerSample> {
        self.samples.last()
    }

    /// Position of the first sample, the reference point for variation seeds
    pub fn origin(&self) -> Option<Vec2> {
        self.first().map(|sample| sample.position)
    }

    /// Sample positions in recording order
    pub fn positions(&self) -> Vec<Vec2> {
        self.samples.iter().map(|sample| sample.position).collect()
    }

    /// Axis-aligned bounding box of all sample positions
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.first()?.position;
        let (min, max) = self
            .samples
            .iter()
            .fold((first, first), |(min, max), sample| {
                (min.min(sample.position), max.max(sample.position))
            });
        Some(Bounds {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        })
    }
}

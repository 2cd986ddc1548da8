//! Brush settings and tool dispatch
//!
//! [`BrushSpec`] is the full set of parameters a generator needs. Every
//! [`Tool`] maps onto exactly one geometry [`Generator`] and one
//! [`ReplayPolicy`]; the match is exhaustive, so a new tool cannot silently
//! fall through to drawing nothing.

use gouache_ipc::{Texture, Tool};

use crate::color::Color;
use crate::constants::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// Brush size used until the overlay changes it
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// Color-variation strength used until the overlay changes it
pub const DEFAULT_VARIATION: f32 = 0.5;

/// Parameters shared by every geometry generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSpec {
    pub tool: Tool,
    pub texture: Texture,
    /// Size in pixels, `[MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]`
    pub size: f32,
    pub color: Color,
    /// Color-variation strength, `[0, 1]`
    pub variation: f32,
}

impl Default for BrushSpec {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            texture: Texture::default(),
            size: DEFAULT_BRUSH_SIZE,
            color: Color::new(0.7, 0.8, 0.4, 1.0),
            variation: DEFAULT_VARIATION,
        }
    }
}

impl BrushSpec {
    /// Set the size from a normalized `[0, 1]` value. NaN is ignored.
    pub fn set_size_normalized(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.size = lerp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, value.clamp(0.0, 1.0));
    }

    /// The size as a normalized `[0, 1]` value
    pub fn size_normalized(&self) -> f32 {
        map_range(self.size, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, 0.0, 1.0)
    }

    /// Set the variation strength, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_variation(&mut self, value: f32) {
        if !value.is_nan() {
            self.variation = value.clamp(0.0, 1.0);
        }
    }

    pub fn generator(&self) -> Generator {
        Generator::for_tool(self.tool)
    }

    pub fn replay_policy(&self) -> ReplayPolicy {
        ReplayPolicy::for_tool(self.tool)
    }
}

/// Geometry generator families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Stamp,
    Ribbon,
    Line,
    Lasso,
    Mirror,
    Polygon,
}

impl Generator {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Brush => Generator::Ribbon,
            Tool::Stamp => Generator::Stamp,
            Tool::Pencil | Tool::Line => Generator::Line,
            Tool::Lasso | Tool::SmoothLasso => Generator::Lasso,
            Tool::Mirror => Generator::Mirror,
            Tool::Polygon { .. } => Generator::Polygon,
        }
    }
}

/// How a tool's geometry is brought up to date after new samples arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// Draw only the samples added since the last pass on top of what is there
    Accumulate,
    /// Clear the active surface and draw the whole shape again
    Redraw,
}

impl ReplayPolicy {
    pub fn for_tool(tool: Tool) -> Self {
        match tool {
            Tool::Brush | Tool::Stamp | Tool::Pencil => ReplayPolicy::Accumulate,
            Tool::Line | Tool::Lasso | Tool::SmoothLasso | Tool::Mirror | Tool::Polygon { .. } => {
                ReplayPolicy::Redraw
            }
        }
    }
}

/// Linearly interpolate between `from` and `to`
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamped
/// to the output range.
///
/// A degenerate input range maps everything to `out_min`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 || !value.is_finite() {
        return out_min;
    }
    let t = ((value - in_min) / span).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}

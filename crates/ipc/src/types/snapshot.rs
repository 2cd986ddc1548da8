//! Read-only engine state published to the overlay.

use serde::{Deserialize, Serialize};

use crate::commands::{Texture, Tool, UiPage};

/// Brush settings as the overlay displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushSnapshot {
    pub tool: Tool,
    pub texture: Texture,
    /// Brush size in pixels
    pub size: f32,
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
    pub alpha: f32,
    pub variation: f32,
    /// Brush color as `#rrggbb` or `#rrggbbaa`
    pub display_color: String,
    /// Background color as `#rrggbb` or `#rrggbbaa`
    pub background_color: String,
}

/// Pointer fields the overlay uses for cursors and previews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: Option<f32>,
    pub pressure: Option<f32>,
    pub down: bool,
    pub hover: bool,
}

/// Axis-aligned bounds in content-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Complete overlay snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSnapshot {
    pub brush: BrushSnapshot,
    pub pointer: PointerSnapshot,
    pub recording_bounds: Option<Bounds>,
    pub page: UiPage,
    pub edit_mode: bool,
    pub eyedropper: bool,
}

/// Fixed overlay regions that capture input before the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiRegion {
    TopStrip,
    SideColumn,
}

/// An input event that landed on an overlay region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiHit {
    pub region: UiRegion,
    /// Content-area coordinates of the hit
    pub x: f32,
    pub y: f32,
}

//! Paint command types for the painting engine.

use serde::{Deserialize, Serialize};

/// Drawing tools selectable from the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Tool {
    /// Freehand ribbon brush
    #[default]
    Brush,
    /// Textured mark placed at every sample
    Stamp,
    /// Thin freehand line
    Pencil,
    /// Straight line from gesture start to the pointer
    Line,
    /// Filled freehand outline
    Lasso,
    /// Filled outline after path simplification
    SmoothLasso,
    /// Outline reflected across the start→end axis
    Mirror,
    /// N-gon from the most spread-out recorded points
    Polygon { sides: u8 },
}

/// Mark textures used by the stamp tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Texture {
    /// Pressure-narrowed capsule
    #[default]
    Rounded,
    /// Capsule over a slightly larger, darker shadow
    Shaded,
    /// Row of circles along the stamp axis
    Rake,
}

/// Overlay pages tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiPage {
    /// No menu open, canvas has focus
    #[default]
    Draw,
    /// Quick tool picker opened by a tap
    QuickTools,
    /// Hue/saturation/luminance sliders
    Color,
    /// Size/variation sliders and textures
    Brush,
    /// Canvas actions (clear, export)
    Menu,
}

/// Commands for controlling the painting engine.
///
/// Setting values are normalized to 0.0-1.0 and clamped by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PaintCommand {
    SetHue { value: f32 },
    SetSaturation { value: f32 },
    SetLuminance { value: f32 },
    SetSize { value: f32 },
    SetVariation { value: f32 },
    /// Discard the uncommitted stroke
    Undo,
    /// Fill the canvas, swapping brush and background colors
    Clear,
    /// Commit and hand the flattened canvas to the export sink
    Export,
    /// Enter or leave in-place stroke editing
    ToggleEdit,
    /// Enter or leave color sampling
    ToggleEyedropper,
    SelectTool { tool: Tool },
    SelectTexture { texture: Texture },
    ShowPage { page: UiPage },
}

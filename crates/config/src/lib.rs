//! Shared configuration for Gouache
//!
//! This crate is the single source of truth for the content-area geometry,
//! the fixed UI hit-region sizes supplied by the overlay, and the gesture
//! thresholds used for tap/draw disambiguation.

use serde::{Deserialize, Serialize};

/// Default content-area width in pixels
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default content-area height in pixels
pub const DEFAULT_HEIGHT: u32 = 800;

/// Default height of the top toolbar strip
pub const DEFAULT_TOP_STRIP: f32 = 48.0;

/// Default width of the side slider column
pub const DEFAULT_SIDE_COLUMN: f32 = 56.0;

/// Display configuration for the painting content area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Content-area width in logical pixels
    pub width: u32,
    /// Content-area height in logical pixels
    pub height: u32,
    /// Content-area origin in device coordinates
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl DisplayConfig {
    /// Map a device coordinate into content-area coordinates
    pub fn to_content(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.origin_x, y - self.origin_y)
    }
}

/// Sizes of the fixed UI hit regions owned by the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiLayout {
    /// Height of the full-width strip along the top edge
    pub top_strip_height: f32,
    /// Width of the column along the left edge, below the strip
    pub side_column_width: f32,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            top_strip_height: DEFAULT_TOP_STRIP,
            side_column_width: DEFAULT_SIDE_COLUMN,
        }
    }
}

/// Thresholds for classifying a finished gesture as a tap or a draw
///
/// A gesture is a tap if it is shorter than `quick_tap_ms` and travelled
/// less than `quick_tap_travel`, or if it travelled less than
/// `still_travel` however long it was held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub quick_tap_ms: f64,
    pub quick_tap_travel: f32,
    pub still_travel: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            quick_tap_ms: 200.0,
            quick_tap_travel: 20.0,
            still_travel: 2.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GouacheConfig {
    pub display: DisplayConfig,
    pub layout: UiLayout,
    pub gesture: GestureConfig,
}

impl GouacheConfig {
    /// Build a config from defaults overridden by environment variables
    ///
    /// - `GOUACHE_CANVAS` as `WIDTHxHEIGHT`
    /// - `GOUACHE_TOP_STRIP` strip height in pixels
    /// - `GOUACHE_SIDE_COLUMN` column width in pixels
    ///
    /// Malformed values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(canvas) = std::env::var("GOUACHE_CANVAS") {
            if let Some((width, height)) = parse_dimensions(&canvas) {
                config.display.width = width;
                config.display.height = height;
            }
        }
        if let Some(strip) = env_f32("GOUACHE_TOP_STRIP") {
            config.layout.top_strip_height = strip;
        }
        if let Some(column) = env_f32("GOUACHE_SIDE_COLUMN") {
            config.layout.side_column_width = column;
        }

        config
    }

    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn env_f32(name: &str) -> Option<f32> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Parse `WIDTHxHEIGHT`, rejecting zero dimensions
pub fn parse_dimensions(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.trim().split_once(['x', 'X'])?;
    let width = width.trim().parse::<u32>().ok()?;
    let height = height.trim().parse::<u32>().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

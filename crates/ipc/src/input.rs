//! Pointer input events delivered by the host.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Press,
    Move,
    Release,
    Cancel,
}

/// Class of device that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mouse,
    Touch,
    Pen,
}

/// A raw pointer event in device coordinates.
///
/// Every capability beyond position is optional: mice report no pressure,
/// most touch screens report no angle, and pens report either tilt or
/// azimuth depending on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub device: DeviceClass,
    pub x: f32,
    pub y: f32,
    /// Normalized pressure 0.0-1.0
    #[serde(default)]
    pub pressure: Option<f32>,
    /// Tilt in degrees, -90..90
    #[serde(default)]
    pub tilt_x: Option<f32>,
    #[serde(default)]
    pub tilt_y: Option<f32>,
    /// Azimuth in radians, 0..2π
    #[serde(default)]
    pub azimuth: Option<f32>,
    /// Altitude in radians, 0 (flat) ..π/2 (perpendicular)
    #[serde(default)]
    pub altitude: Option<f32>,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl PointerEvent {
    /// Create an event carrying only position and timestamp
    pub fn new(phase: PointerPhase, device: DeviceClass, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            phase,
            device,
            x,
            y,
            pressure: None,
            tilt_x: None,
            tilt_y: None,
            azimuth: None,
            altitude: None,
            timestamp_ms,
        }
    }

    /// Builder-style pressure setter
    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Builder-style tilt setter (degrees)
    pub fn with_tilt(mut self, tilt_x: f32, tilt_y: f32) -> Self {
        self.tilt_x = Some(tilt_x);
        self.tilt_y = Some(tilt_y);
        self
    }

    /// Builder-style azimuth setter (radians)
    pub fn with_azimuth(mut self, azimuth: f32) -> Self {
        self.azimuth = Some(azimuth);
        self
    }
}

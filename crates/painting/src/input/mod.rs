//! Input normalization
//!
//! Raw host events arrive in device coordinates with whatever capabilities
//! the device happens to report. This module turns them into canonical
//! [`PointerSample`]s, tracks the single [`PointerState`], classifies the
//! device session, and exposes the tap/draw classifier and UI hit regions.

mod gesture;
mod tilt;

use glam::Vec2;
use gouache_ipc::{DeviceClass, PointerEvent, PointerPhase};
use tracing::info;

use crate::constants::FALLBACK_PRESSURE;

pub use gesture::{GestureKind, classify_gesture};
pub use hit_test::UiRegions;
pub use tilt::azimuth_from_tilt;

/// One canonical pointer sample in content-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    /// Pen azimuth in radians, `[0, 2π)`
    pub angle: Option<f32>,
    /// Normalized pressure, `[0, 1]`
    pub pressure: Option<f32>,
    /// Pen altitude in radians
    pub altitude: Option<f32>,
    pub phase: PointerPhase,
}

impl PointerSample {
    /// A bare sample with no optional capabilities
    pub fn at(position: Vec2, phase: PointerPhase) -> Self {
        Self {
            position,
            angle: None,
            pressure: None,
            altitude: None,
            phase,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Pressure, or [`FALLBACK_PRESSURE`] for devices that report none
    pub fn pressure_or_default(&self) -> f32 {
        self.pressure.unwrap_or(FALLBACK_PRESSURE)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Where and when the current gesture started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAnchor {
    pub position: Vec2,
    pub angle: Option<f32>,
    pub pressure: Option<f32>,
    pub timestamp_ms: f64,
}

/// Session classification by the kind of device that drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionKind {
    /// No capable event seen yet
    #[default]
    Unknown,
    /// Driven by touch or pen; no hover
    TouchCapable,
    /// Driven by a mouse; hover is tracked
    PointerCapable,
}

/// Sticky device-session classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceSession {
    kind: SessionKind,
}

impl DeviceSession {
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Whether hover should be tracked for this session
    pub fn tracks_hover(&self) -> bool {
        self.kind == SessionKind::PointerCapable
    }

    /// Update the classification from an incoming event.
    ///
    /// The first event classifies the session. Afterwards only a mouse move
    /// seen during a touch session reclassifies it.
    pub fn observe(&mut self, device: DeviceClass, phase: PointerPhase) -> SessionKind {
        match (self.kind, device) {
            (SessionKind::Unknown, DeviceClass::Touch | DeviceClass::Pen) => {
                self.kind = SessionKind::TouchCapable;
                info!("Input session classified as touch-capable ({:?})", device);
            }
            (SessionKind::Unknown, DeviceClass::Mouse) => {
                self.kind = SessionKind::PointerCapable;
                info!("Input session classified as pointer-capable");
            }
            (SessionKind::TouchCapable, DeviceClass::Mouse) if phase == PointerPhase::Move => {
                self.kind = SessionKind::PointerCapable;
                info!("Mouse movement during touch session, reclassified as pointer-capable");
            }
            _ => {}
        }
        self.kind
    }
}

/// The single pointer state, updated by every accepted event
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub current: Option<PointerSample>,
    pub previous: Option<PointerSample>,
    pub anchor: Option<GestureAnchor>,
    pub down: bool,
    pub hover: bool,
    /// Set by the press that started the current gesture, cleared by the next event
    pub just_pressed: bool,
    /// Set by the release or cancel that ended the gesture, cleared by the next event
    pub just_released: bool,
}

impl PointerState {
    /// Apply one event at `position` (already in content-area coordinates)
    /// and return the canonical sample it produced.
    pub fn apply(&mut self, event: &PointerEvent, position: Vec2, track_hover: bool) -> PointerSample {
        let was_down = self.down;

        let mut pressure = event
            .pressure
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0));
        // Some devices drop to zero mid-stroke; keep the last real reading
        if was_down && pressure == Some(0.0) {
            if let Some(held) = self.last_pressure().filter(|p| *p > 0.0) {
                pressure = Some(held);
            }
        }

        let angle = event
            .azimuth
            .filter(|a| a.is_finite())
            .map(|a| a.rem_euclid(std::f32::consts::TAU))
            .or_else(|| match (event.tilt_x, event.tilt_y) {
                (Some(tilt_x), Some(tilt_y)) => azimuth_from_tilt(tilt_x, tilt_y),
                _ => None,
            });

        let sample = PointerSample {
            position,
            angle,
            pressure,
            altitude: event.altitude.filter(|a| a.is_finite()),
            phase: event.phase,
        };

        self.down = match event.phase {
            PointerPhase::Press => true,
            PointerPhase::Move => was_down,
            PointerPhase::Release | PointerPhase::Cancel => false,
        };
        self.just_pressed = event.phase == PointerPhase::Press;
        self.just_released = was_down && matches!(event.phase, PointerPhase::Release | PointerPhase::Cancel);
        self.hover = track_hover && !self.down;

        if event.phase == PointerPhase::Press {
            self.anchor = Some(GestureAnchor {
                position,
                angle,
                pressure,
                timestamp_ms: event.timestamp_ms,
            });
        }

        self.previous = self.current.replace(sample);
        sample
    }

    fn last_pressure(&self) -> Option<f32> {
        self.current.and_then(|sample| sample.pressure)
    }

    /// Current position, if any event has been seen
    pub fn position(&self) -> Option<Vec2> {
        self.current.map(|sample| sample.position)
    }

    /// Straight-line distance from the gesture anchor to the current position
    pub fn travel(&self) -> f32 {
        match (self.anchor, self.current) {
            (Some(anchor), Some(current)) => anchor.position.distance(current.position),
            _ => 0.0,
        }
    }

    /// Milliseconds since the gesture anchor, measured at `now_ms`
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.anchor
            .map(|anchor| (now_ms - anchor.timestamp_ms).max(0.0))
            .unwrap_or(0.0)
    }
}

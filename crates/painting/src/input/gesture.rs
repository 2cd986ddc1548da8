//! Tap versus draw disambiguation

use gouache_config::GestureConfig;

/// How a finished gesture was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Short or stationary contact: a UI request rather than a mark
    Tap,
    /// Anything else
    Draw,
}

/// Classify a gesture from its duration and straight-line travel.
///
/// Quick contacts that stay within the tap radius are taps, and so are
/// contacts that never leave the stillness radius (long presses).
pub fn classify_gesture(duration_ms: f64, travel: f32, config: &GestureConfig) -> GestureKind {
    let quick = duration_ms < config.quick_tap_ms && travel < config.quick_tap_travel;
    let still = travel < config.still_travel;
    if quick || still {
        GestureKind::Tap
    } else {
        GestureKind::Draw
    }
}

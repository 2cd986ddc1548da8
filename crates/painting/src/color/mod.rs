//! Perceptual color model
//!
//! Colors are stored as OKHSL + alpha. Hue is kept unclamped so callers can
//! do wraparound arithmetic; it is wrapped only when converting for display.

pub mod okhsl;

use serde::{Deserialize, Serialize};

use crate::constants::HUE_FALLBACK_SATURATION;
use crate::noise::signed_noise;
use okhsl::{Okhsl, okhsl_to_srgb, srgb_to_okhsl};

/// Luminance jitter at variation strength 1.0.
const LUMINANCE_VARIATION: f32 = 0.3;

/// Hue jitter at variation strength 1.0 and full saturation.
const HUE_VARIATION: f32 = 0.15;

/// A color in OKHSL space with alpha, every component nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 1.0,
    };

    pub const WHITE: Color = Color {
        h: 0.0,
        s: 0.0,
        l: 1.0,
        a: 1.0,
    };

    /// Create a color, clamping saturation, luminance and alpha
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        let mut color = Self::BLACK;
        color.set_hue(h);
        color.set_saturation(s);
        color.set_luminance(l);
        color.set_alpha(a);
        color
    }

    /// Set hue without clamping. NaN is ignored.
    pub fn set_hue(&mut self, h: f32) {
        if !h.is_nan() {
            self.h = h;
        }
    }

    /// Set saturation, clamped to [0, 1]. NaN is ignored.
    pub fn set_saturation(&mut self, s: f32) {
        if !s.is_nan() {
            self.s = s.clamp(0.0, 1.0);
        }
    }

    /// Set luminance, clamped to [0, 1]. NaN is ignored.
    pub fn set_luminance(&mut self, l: f32) {
        if !l.is_nan() {
            self.l = l.clamp(0.0, 1.0);
        }
    }

    /// Set alpha, clamped to [0, 1]. NaN is ignored.
    pub fn set_alpha(&mut self, a: f32) {
        if !a.is_nan() {
            self.a = a.clamp(0.0, 1.0);
        }
    }

    pub fn with_hue(mut self, h: f32) -> Self {
        self.set_hue(h);
        self
    }

    pub fn with_saturation(mut self, s: f32) -> Self {
        self.set_saturation(s);
        self
    }

    pub fn with_luminance(mut self, l: f32) -> Self {
        self.set_luminance(l);
        self
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.set_alpha(a);
        self
    }

    /// Interpolate each component independently.
    ///
    /// Hue is interpolated linearly, not around the shorter arc of the hue
    /// circle: lerping 0.9 → 0.1 passes through 0.5.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Color::new(
            mix(self.h, other.h),
            mix(self.s, other.s),
            mix(self.l, other.l),
            mix(self.a, other.a),
        )
    }

    /// Deterministically jitter luminance and hue.
    ///
    /// The same `seed` always yields the same color. Hue jitter is scaled by
    /// a smoothstep of the saturation so near-grays barely change hue.
    pub fn vary(self, seed: f32, strength: f32) -> Color {
        if strength <= 0.0 || strength.is_nan() {
            return self;
        }
        let luminance_shift = signed_noise(seed, 0) * strength * LUMINANCE_VARIATION;
        let hue_shift = signed_noise(seed, 1) * strength * HUE_VARIATION * ease(self.s);

        let mut varied = self;
        varied.set_luminance(self.l + luminance_shift);
        varied.set_hue(self.h + hue_shift);
        varied
    }

    /// Scale luminance by `factor`
    pub fn darken(self, factor: f32) -> Color {
        self.with_luminance(self.l * factor)
    }

    /// Convert to 8-bit sRGB
    pub fn to_srgb8(self) -> [u8; 3] {
        let rgb = okhsl_to_srgb(Okhsl {
            h: f64::from(self.h),
            s: f64::from(self.s),
            l: f64::from(self.l),
        });
        rgb.map(|c| (c * 255.0).round() as u8)
    }

    /// Convert to 8-bit straight-alpha RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = self.to_srgb8();
        [r, g, b, (self.a.clamp(0.0, 1.0) * 255.0).round() as u8]
    }

    /// Convert from 8-bit sRGB.
    ///
    /// When the result is nearly achromatic its computed hue is numerically
    /// meaningless, so `fallback_hue` is used instead.
    pub fn from_srgb8(rgb: [u8; 3], fallback_hue: f32) -> Color {
        let hsl = srgb_to_okhsl(rgb.map(|c| f64::from(c) / 255.0));
        let s = hsl.s as f32;
        let h = if s < HUE_FALLBACK_SATURATION {
            fallback_hue
        } else {
            hsl.h as f32
        };
        Color::new(h, s, hsl.l as f32, 1.0)
    }

    /// Convert from 8-bit straight-alpha RGBA
    pub fn from_rgba8(rgba: [u8; 4], fallback_hue: f32) -> Color {
        let [r, g, b, a] = rgba;
        Color::from_srgb8([r, g, b], fallback_hue).with_alpha(f32::from(a) / 255.0)
    }

    /// Display string `#rrggbb`, with `aa` appended only when alpha is not 1
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Convert to a rasterizer color
    pub fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.to_rgba8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

/// Smoothstep on [0, 1]
fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

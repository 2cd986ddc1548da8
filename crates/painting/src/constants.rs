/// Default tile size for dirty tracking.
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Smallest brush size in pixels (setting value 0.0).
pub const MIN_BRUSH_SIZE: f32 = 4.0;

/// Largest brush size in pixels (setting value 1.0).
pub const MAX_BRUSH_SIZE: f32 = 300.0;

/// Period of the variation noise. Seeds are reduced modulo this before hashing.
pub const NOISE_TABLE_SIZE: u64 = 10_007;

/// Saturation below which a converted hue is considered unreliable.
pub const HUE_FALLBACK_SATURATION: f32 = 0.01;

/// Maximum deviation kept by path simplification for the smooth lasso.
pub const SIMPLIFY_EPSILON: f32 = 3.0;

/// Pressure assumed for pressed devices that report none (mice).
pub const FALLBACK_PRESSURE: f32 = 0.5;

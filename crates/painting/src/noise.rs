//! Deterministic noise for color and shape variation
//!
//! Stroke replay must reproduce identical pixels, so every "random" choice
//! made by the brushes comes from this pure hash of a seed instead of a
//! runtime RNG. Seeds are floored and reduced modulo [`NOISE_TABLE_SIZE`],
//! which makes the sequence periodic like a fixed lookup table.

use crate::constants::NOISE_TABLE_SIZE;

/// Hash `seed` (and an independent `channel`) into a value in `[0, 1)`.
///
/// Seeds with the same `floor(|seed|) mod NOISE_TABLE_SIZE` produce the same
/// value. Non-finite seeds map to index 0.
pub fn noise(seed: f32, channel: u32) -> f32 {
    let index = if seed.is_finite() {
        (seed.abs().floor() as u64) % NOISE_TABLE_SIZE
    } else {
        0
    };

    // splitmix64 finalizer over (index, channel)
    let mut z = index
        .wrapping_add(u64::from(channel) << 32)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;

    // Top 24 bits fit exactly in an f32 mantissa
    (z >> 40) as f32 / (1u64 << 24) as f32
}

/// Signed variant of [`noise`] in `[-0.5, 0.5)`.
#[inline]
pub fn signed_noise(seed: f32, channel: u32) -> f32 {
    noise(seed, channel) - 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        for seed in [0.0, 1.5, 42.0, 9_999.9, -17.2] {
            assert_eq!(noise(seed, 0), noise(seed, 0));
        }
    }

    #[test]
    fn test_noise_range() {
        for i in 0..2_000 {
            let value = noise(i as f32 * 0.7, i % 3);
            assert!((0.0..1.0).contains(&value), "noise out of range: {}", value);
        }
    }

    #[test]
    fn test_noise_floors_absolute_seed() {
        assert_eq!(noise(12.2, 0), noise(12.9, 0));
        assert_eq!(noise(-12.5, 0), noise(12.5, 0));
    }

    #[test]
    fn test_noise_wraps_at_table_size() {
        let period = NOISE_TABLE_SIZE as f32;
        assert_eq!(noise(3.0, 1), noise(3.0 + period, 1));
    }

    #[test]
    fn test_channels_are_independent() {
        let differing = (0..100)
            .filter(|&i| noise(i as f32, 0) != noise(i as f32, 1))
            .count();
        assert!(differing > 90);
    }

    #[test]
    fn test_non_finite_seed() {
        assert_eq!(noise(f32::NAN, 2), noise(0.0, 2));
        assert_eq!(noise(f32::INFINITY, 2), noise(0.0, 2));
    }
}

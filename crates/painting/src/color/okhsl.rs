//! OKHSL ↔ sRGB conversion
//!
//! Implements Björn Ottosson's OKHSL space: OKLab lightness passed through a
//! toe curve, and chroma rescaled against the sRGB gamut so saturation 1.0
//! always reaches the gamut edge. Components are normalized to [0, 1].
//! Math runs in f64 to keep the round trip stable.

use std::f64::consts::PI;

/// Components of an OKHSL color, each nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Okhsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Chroma below which the hue of a color is undefined.
const ACHROMATIC_CHROMA: f64 = 1e-7;

const TOE_K1: f64 = 0.206;
const TOE_K2: f64 = 0.03;
const TOE_K3: f64 = (1.0 + TOE_K1) / (1.0 + TOE_K2);

fn toe(x: f64) -> f64 {
    let t = TOE_K3 * x - TOE_K1;
    0.5 * (t + (t * t + 4.0 * TOE_K2 * TOE_K3 * x).sqrt())
}

fn toe_inv(x: f64) -> f64 {
    (x * x + TOE_K1 * x) / (TOE_K3 * (x + TOE_K2))
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> [f64; 3] {
    let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
    let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
    let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

    [
        0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    ]
}

fn oklab_to_linear_srgb(lightness: f64, a: f64, b: f64) -> [f64; 3] {
    let l = lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m = lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s = lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l = l * l * l;
    let m = m * m * m;
    let s = s * s * s;

    [
        4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
        -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
        -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
    ]
}

/// LMS weights of each linear sRGB channel, used by the gamut solvers.
const CHANNEL_WEIGHTS: [[f64; 3]; 3] = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

fn lms_slopes(a: f64, b: f64) -> [f64; 3] {
    [
        0.396_337_777_4 * a + 0.215_803_757_3 * b,
        -0.105_561_345_8 * a - 0.063_854_172_8 * b,
        -0.089_484_177_5 * a - 1.291_485_548_0 * b,
    ]
}

/// Maximum saturation (C/L) reachable in sRGB for the normalized hue (a, b).
fn compute_max_saturation(a: f64, b: f64) -> f64 {
    // Polynomial fit for the channel that clips first, then one Halley step
    let (k, weights) = if -1.881_703_28 * a - 0.809_364_93 * b > 1.0 {
        (
            [1.190_862_77, 1.765_767_28, 0.596_626_41, 0.755_151_97, 0.567_712_45],
            CHANNEL_WEIGHTS[0],
        )
    } else if 1.814_441_04 * a - 1.194_452_76 * b > 1.0 {
        (
            [0.739_565_15, -0.459_544_04, 0.082_854_27, 0.125_410_70, 0.145_032_04],
            CHANNEL_WEIGHTS[1],
        )
    } else {
        (
            [1.357_336_52, -0.009_157_99, -1.151_302_10, -0.505_596_06, 0.006_921_67],
            CHANNEL_WEIGHTS[2],
        )
    };

    let saturation = k[0] + k[1] * a + k[2] * b + k[3] * a * a + k[4] * a * b;
    let slopes = lms_slopes(a, b);

    let mut f = 0.0;
    let mut f1 = 0.0;
    let mut f2 = 0.0;
    for i in 0..3 {
        let root = 1.0 + saturation * slopes[i];
        f += weights[i] * root * root * root;
        f1 += weights[i] * 3.0 * slopes[i] * root * root;
        f2 += weights[i] * 6.0 * slopes[i] * slopes[i] * root;
    }

    saturation - f * f1 / (f1 * f1 - 0.5 * f * f2)
}

/// Lightness and chroma of the gamut cusp for the normalized hue (a, b).
fn find_cusp(a: f64, b: f64) -> (f64, f64) {
    let s_cusp = compute_max_saturation(a, b);
    let rgb = oklab_to_linear_srgb(1.0, s_cusp * a, s_cusp * b);
    let l_cusp = (1.0 / rgb[0].max(rgb[1]).max(rgb[2])).cbrt();
    (l_cusp, l_cusp * s_cusp)
}

/// Parameter t where the line from (L0, 0) to (L1, C1) leaves the gamut.
fn find_gamut_intersection(a: f64, b: f64, l1: f64, c1: f64, l0: f64, cusp: (f64, f64)) -> f64 {
    let (cusp_l, cusp_c) = cusp;

    if (l1 - l0) * cusp_c - (cusp_l - l0) * c1 <= 0.0 {
        // Lower half: the triangle edge is exact
        return cusp_c * l0 / (c1 * cusp_l + cusp_c * (l0 - l1));
    }

    // Upper half: start from the triangle and refine with one Halley step
    let mut t = cusp_c * (l0 - 1.0) / (c1 * (cusp_l - 1.0) + cusp_c * (l0 - l1));

    let slopes = lms_slopes(a, b);
    let dl = l1 - l0;
    let dt = [dl + c1 * slopes[0], dl + c1 * slopes[1], dl + c1 * slopes[2]];

    let lightness = l0 * (1.0 - t) + t * l1;
    let chroma = t * c1;
    let mut lms = [0.0; 3];
    let mut lms_dt = [0.0; 3];
    let mut lms_dt2 = [0.0; 3];
    for i in 0..3 {
        let root = lightness + chroma * slopes[i];
        lms[i] = root * root * root;
        lms_dt[i] = 3.0 * dt[i] * root * root;
        lms_dt2[i] = 6.0 * dt[i] * dt[i] * root;
    }

    let mut step = f64::MAX;
    for weights in CHANNEL_WEIGHTS {
        let dot = |v: &[f64; 3]| weights[0] * v[0] + weights[1] * v[1] + weights[2] * v[2];
        let value = dot(&lms) - 1.0;
        let d1 = dot(&lms_dt);
        let d2 = dot(&lms_dt2);
        let u = d1 / (d1 * d1 - 0.5 * value * d2);
        if u >= 0.0 {
            step = step.min(-value * u);
        }
    }
    t += step;
    t
}

fn st_mid(a: f64, b: f64) -> (f64, f64) {
    let s = 0.115_169_93
        + 1.0
            / (7.447_789_70
                + 4.159_012_40 * b
                + a * (-2.195_573_47
                    + 1.751_984_01 * b
                    + a * (-2.137_049_48
                        - 10.023_010_43 * b
                        + a * (-4.248_945_61 + 5.387_708_19 * b + 4.698_910_13 * a))));
    let t = 0.112_396_42
        + 1.0
            / (1.613_203_20 - 0.681_243_79 * b
                + a * (0.403_706_12
                    + 0.901_481_23 * b
                    + a * (-0.270_879_43
                        + 0.612_239_90 * b
                        + a * (0.002_992_15 - 0.453_995_68 * b - 0.146_618_72 * a))));
    (s, t)
}

/// Reference chromas (C_0, C_mid, C_max) for lightness `l` along hue (a, b).
fn chroma_stops(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let cusp = find_cusp(a, b);
    let c_max = find_gamut_intersection(a, b, l, 1.0, l, cusp);
    let (cusp_l, cusp_c) = cusp;
    let st_max = (cusp_c / cusp_l, cusp_c / (1.0 - cusp_l));

    let k = c_max / (l * st_max.0).min((1.0 - l) * st_max.1);

    let (mid_s, mid_t) = st_mid(a, b);
    let ca = l * mid_s;
    let cb = (1.0 - l) * mid_t;
    let c_mid = 0.9 * k * (1.0 / (1.0 / ca.powi(4) + 1.0 / cb.powi(4))).sqrt().sqrt();

    let ca = l * 0.4;
    let cb = (1.0 - l) * 0.8;
    let c_0 = (1.0 / (1.0 / (ca * ca) + 1.0 / (cb * cb))).sqrt();

    (c_0, c_mid, c_max)
}

const MID: f64 = 0.8;
const MID_INV: f64 = 1.25;

/// Convert OKHSL to gamma-encoded sRGB components in [0, 1].
pub fn okhsl_to_srgb(hsl: Okhsl) -> [f64; 3] {
    let Okhsl { h, s, l } = hsl;
    if l >= 1.0 {
        return [1.0, 1.0, 1.0];
    }
    if l <= 0.0 {
        return [0.0, 0.0, 0.0];
    }

    let angle = 2.0 * PI * h.rem_euclid(1.0);
    let a = angle.cos();
    let b = angle.sin();
    let lightness = toe_inv(l);

    let chroma = if s <= 0.0 {
        0.0
    } else {
        let (c_0, c_mid, c_max) = chroma_stops(lightness, a, b);
        if s < MID {
            let t = MID_INV * s;
            let k1 = MID * c_0;
            let k2 = 1.0 - k1 / c_mid;
            t * k1 / (1.0 - k2 * t)
        } else {
            let t = (s - MID) / (1.0 - MID);
            let k0 = c_mid;
            let k1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
            let k2 = 1.0 - k1 / (c_max - c_mid);
            k0 + t * k1 / (1.0 - k2 * t)
        }
    };

    let rgb = oklab_to_linear_srgb(lightness, chroma * a, chroma * b);
    rgb.map(|c| linear_to_srgb(c).clamp(0.0, 1.0))
}

/// Convert gamma-encoded sRGB components in [0, 1] to OKHSL.
///
/// Achromatic inputs have no defined hue; they report hue 0 and saturation
/// 0, and callers substitute their own hue.
pub fn srgb_to_okhsl(rgb: [f64; 3]) -> Okhsl {
    let [r, g, b] = rgb.map(|c| srgb_to_linear(c.clamp(0.0, 1.0)));
    let [lightness, lab_a, lab_b] = linear_srgb_to_oklab(r, g, b);
    let l = toe(lightness).clamp(0.0, 1.0);

    let chroma = (lab_a * lab_a + lab_b * lab_b).sqrt();
    if chroma < ACHROMATIC_CHROMA || l <= 0.0 || l >= 1.0 {
        return Okhsl { h: 0.0, s: 0.0, l };
    }

    let a = lab_a / chroma;
    let b = lab_b / chroma;
    let h = 0.5 + 0.5 * (-lab_b).atan2(-lab_a) / PI;

    let (c_0, c_mid, c_max) = chroma_stops(lightness, a, b);
    let s = if chroma < c_mid {
        let k1 = MID * c_0;
        let k2 = 1.0 - k1 / c_mid;
        let t = chroma / (k1 + k2 * chroma);
        t * MID
    } else {
        let k0 = c_mid;
        let k1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
        let k2 = 1.0 - k1 / (c_max - c_mid);
        let t = (chroma - k0) / (k1 + k2 * (chroma - k0));
        MID + (1.0 - MID) * t
    };

    Okhsl {
        h,
        s: s.clamp(0.0, 1.0),
        l,
    }
}

//! Gamma lookup tables generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Convert an 8-bit sRGB channel to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a linear value to sRGB (0.0..=1.0) using LUT with linear interpolation.
///
/// Input is clamped to 0.0..=1.0 first; out-of-gamut values after chroma
/// scaling are expected.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = if linear.is_nan() {
        0.0
    } else {
        linear.clamp(0.0, 1.0)
    };

    let scaled = linear * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return LINEAR_TO_SRGB[4095];
    }

    let frac = scaled - index as f32;
    let a = LINEAR_TO_SRGB[index];
    let b = LINEAR_TO_SRGB[index + 1];
    a + (b - a) * frac
}

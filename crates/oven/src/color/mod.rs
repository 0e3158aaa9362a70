//! Color math behind the saturation transform.
//!
//! Saturation is scaled as chroma in Oklch, the polar form of Oklab. Unlike
//! HSL/HSV, Oklch is perceptually uniform, so scaling chroma keeps both hue
//! and lightness where they were.
//!
//! ```text
//! sRGB bytes -> LinearRgb (gamma LUT) -> Oklab -> Oklch
//!                                                  | scale chroma
//! sRGB bytes <- LinearRgb (clamped)   <- Oklab <- Oklch
//! ```

mod linear_rgb;
mod lut;
mod oklab;

pub use linear_rgb::LinearRgb;
pub use oklab::{Oklab, Oklch};

/// Scale the saturation of one sRGB pixel by `factor`.
///
/// `factor` 1.0 leaves chroma unchanged, 0.0 produces gray at the same
/// lightness. Negative factors clamp to 0.0.
#[inline]
pub fn saturate_pixel(rgb: [u8; 3], factor: f32) -> [u8; 3] {
    let lch = Oklch::from(Oklab::from(LinearRgb::from_srgb8(rgb)));
    LinearRgb::from(Oklab::from(lch.scale_chroma(factor))).to_srgb8()
}

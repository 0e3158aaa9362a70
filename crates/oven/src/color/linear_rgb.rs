use super::lut::{linear_to_srgb, srgb8_to_linear};

/// A color in linear RGB, where light adds physically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode 8-bit sRGB channels through the gamma LUT.
    #[inline]
    pub fn from_srgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: srgb8_to_linear(r),
            g: srgb8_to_linear(g),
            b: srgb8_to_linear(b),
        }
    }

    /// Encode back to 8-bit sRGB, clamping out-of-gamut channels.
    #[inline]
    pub fn to_srgb8(self) -> [u8; 3] {
        let encode = |c: f32| (linear_to_srgb(c) * 255.0).round() as u8;
        [encode(self.r), encode(self.g), encode(self.b)]
    }
}

//! The seam between transforms and the pixel engine.
//!
//! Transforms decide *what* to do (target dimensions, saturation factor,
//! encoder quality); an [`ImageCodec`] decides *how*. The production
//! implementation is [`ImageRsCodec`]. Tests swap in a recording mock so
//! parameter derivation can be checked without touching pixels.

mod avif;
mod format;
mod image_rs;
#[cfg(test)]
pub(crate) mod mock;

pub use format::ContainerFormat;
pub use image_rs::ImageRsCodec;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode {format} image: {message}")]
    Encode {
        format: ContainerFormat,
        message: String,
    },
}

/// Format and dimensions read from an encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ContainerFormat,
}

/// How a resize maps the source onto the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scale width and height independently to exactly the target size.
    Fill,
    /// Preserve aspect ratio, fitting inside the target box.
    Inside,
}

/// Quality setting for lossy image encoding (1-100, higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const BEST: Quality = Quality(100);
    pub const WORST: Quality = Quality(1);

    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Pixel engine used by the transforms.
///
/// Every operation decodes its input, and every output is re-encoded in the
/// input's container format.
pub trait ImageCodec: Send + Sync {
    /// Read the format and dimensions of an encoded buffer.
    fn probe(&self, image: &[u8]) -> Result<ImageInfo, CodecError>;

    /// Resize to `width` x `height` according to `fit`.
    fn resize(&self, image: &[u8], width: u32, height: u32, fit: Fit)
        -> Result<Vec<u8>, CodecError>;

    /// Multiply the saturation of every pixel by `multiplier`.
    fn saturate(&self, image: &[u8], multiplier: f32) -> Result<Vec<u8>, CodecError>;

    /// Re-encode with the given lossy quality.
    fn reencode(&self, image: &[u8], quality: Quality) -> Result<Vec<u8>, CodecError>;
}

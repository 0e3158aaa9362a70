//! Pure Rust codec built on the `image` crate ecosystem.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe (JPEG, PNG, WebP, GIF, TIFF) | `image::ImageReader::into_dimensions` |
//! | Probe / decode (AVIF) | `avif-parse` + `rav1d` (see [`avif`](super::avif)) |
//! | Decode | `image` decoders, GIF reads the first frame |
//! | Resize | `DynamicImage::resize_exact` / `resize` with `Lanczos3` |
//! | Saturation | Oklch chroma scaling ([`crate::color`]) |
//! | Encode JPEG / AVIF | `JpegEncoder` / `AvifEncoder` with quality |
//! | Encode PNG, GIF, TIFF, WebP | `DynamicImage::write_to` (WebP lossless) |
//! | Re-encode PNG, GIF, TIFF, WebP | decode check only, input bytes returned |

use super::{avif, CodecError, ContainerFormat, Fit, ImageCodec, ImageInfo, Quality};
use crate::color::saturate_pixel;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage, RgbaImage};
use std::io::Cursor;

/// Speed preset for rav1e: 1 (slowest, smallest) to 10 (fastest).
const AVIF_SPEED: u8 = 6;

/// Production [`ImageCodec`] backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRsCodec;

impl ImageRsCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Sniff the container format from the leading bytes.
fn detect_format(data: &[u8]) -> Result<ContainerFormat, CodecError> {
    let format = image::guess_format(data).map_err(|_| CodecError::UnsupportedFormat)?;
    ContainerFormat::from_image_format(format).ok_or(CodecError::UnsupportedFormat)
}

fn decode(data: &[u8], format: ContainerFormat) -> Result<DynamicImage, CodecError> {
    if format == ContainerFormat::Avif {
        return avif::decode(data);
    }
    image::load_from_memory_with_format(data, format.image_format())
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encode `img` as `format`; `quality` only affects the lossy encoders.
fn encode(
    img: &DynamicImage,
    format: ContainerFormat,
    quality: Quality,
) -> Result<Vec<u8>, CodecError> {
    let encode_error = |e: image::ImageError| CodecError::Encode {
        format,
        message: e.to_string(),
    };

    let mut out = Cursor::new(Vec::new());
    match format {
        ContainerFormat::Jpeg => {
            // JPEG has no alpha channel and only 8-bit samples
            let flattened;
            let source = match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
                _ => {
                    flattened = DynamicImage::ImageRgb8(img.to_rgb8());
                    &flattened
                }
            };
            let encoder = JpegEncoder::new_with_quality(&mut out, quality.value());
            source.write_with_encoder(encoder).map_err(encode_error)?;
        }
        ContainerFormat::Avif => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            let encoder =
                AvifEncoder::new_with_speed_quality(&mut out, AVIF_SPEED, quality.value());
            rgba.write_with_encoder(encoder).map_err(encode_error)?;
        }
        ContainerFormat::WebP | ContainerFormat::Gif => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_to(&mut out, format.image_format())
                .map_err(encode_error)?;
        }
        ContainerFormat::Png | ContainerFormat::Tiff => {
            img.write_to(&mut out, format.image_format())
                .map_err(encode_error)?;
        }
    }
    Ok(out.into_inner())
}

/// Apply the saturation multiplier to every pixel, keeping alpha if present.
fn saturate_image(img: &DynamicImage, multiplier: f32) -> DynamicImage {
    if img.color().has_alpha() {
        let mut rgba: RgbaImage = img.to_rgba8();
        for pixel in rgba.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let [r, g, b] = saturate_pixel([r, g, b], multiplier);
            pixel.0 = [r, g, b, a];
        }
        DynamicImage::ImageRgba8(rgba)
    } else {
        let mut rgb: RgbImage = img.to_rgb8();
        for pixel in rgb.pixels_mut() {
            pixel.0 = saturate_pixel(pixel.0, multiplier);
        }
        DynamicImage::ImageRgb8(rgb)
    }
}

impl ImageCodec for ImageRsCodec {
    fn probe(&self, image: &[u8]) -> Result<ImageInfo, CodecError> {
        let format = detect_format(image)?;
        let (width, height) = if format == ContainerFormat::Avif {
            avif::dimensions(image)?
        } else {
            ImageReader::with_format(Cursor::new(image), format.image_format())
                .into_dimensions()
                .map_err(|e| CodecError::Decode(e.to_string()))?
        };
        Ok(ImageInfo {
            width,
            height,
            format,
        })
    }

    fn resize(
        &self,
        image: &[u8],
        width: u32,
        height: u32,
        fit: Fit,
    ) -> Result<Vec<u8>, CodecError> {
        let format = detect_format(image)?;
        let img = decode(image, format)?;

        let resized = if img.width() == width && img.height() == height {
            img
        } else {
            match fit {
                Fit::Fill => img.resize_exact(width, height, FilterType::Lanczos3),
                Fit::Inside => img.resize(width, height, FilterType::Lanczos3),
            }
        };
        tracing::trace!(
            format = %format,
            width = resized.width(),
            height = resized.height(),
            "Resized image"
        );
        encode(&resized, format, Quality::default())
    }

    fn saturate(&self, image: &[u8], multiplier: f32) -> Result<Vec<u8>, CodecError> {
        let format = detect_format(image)?;
        let img = decode(image, format)?;

        // Oklab round-trips are not bit exact, so a unit multiplier skips the pixel pass
        if multiplier == 1.0 {
            return encode(&img, format, Quality::default());
        }
        encode(&saturate_image(&img, multiplier), format, Quality::default())
    }

    fn reencode(&self, image: &[u8], quality: Quality) -> Result<Vec<u8>, CodecError> {
        let format = detect_format(image)?;
        let img = decode(image, format)?;
        if !format.has_quality() {
            // No quality setting to lower; hand back the validated input
            tracing::debug!(%format, "No quality setting, keeping input bytes");
            return Ok(image.to_vec());
        }
        encode(&img, format, quality)
    }
}

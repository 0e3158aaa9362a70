//! Test fixtures: images encoded in memory.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

/// Gradient test image, encoded in `format`
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 5 % 256) as u8, (y * 3 % 256) as u8, 200])
    });
    let mut out = Cursor::new(Vec::new());
    let img = match format {
        ImageFormat::WebP | ImageFormat::Gif => DynamicImage::ImageRgba8(
            DynamicImage::ImageRgb8(img).to_rgba8(),
        ),
        _ => DynamicImage::ImageRgb8(img),
    };
    img.write_to(&mut out, format).expect("Failed to encode fixture");
    out.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Jpeg)
}

/// Bytes that look like nothing in particular
pub const NOT_AN_IMAGE: &[u8] = b"certainly not an image";

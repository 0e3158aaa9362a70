use crate::codec::{Fit, ImageCodec};
use crate::error::TransformError;
use crate::intensity::Intensity;

/// Largest width a transform may produce.
pub const MAX_WIDTH: u32 = 7680;
/// Largest height a transform may produce.
pub const MAX_HEIGHT: u32 = 4320;

/// Output dimensions for stretching a `width` x `height` image.
///
/// Width grows by `1 + intensity/200` and height shrinks by the same factor,
/// so the pixel count stays roughly constant. Intensity 0 is the identity.
pub fn stretch_dimensions(
    width: u32,
    height: u32,
    intensity: Intensity,
) -> Result<(u32, u32), TransformError> {
    let scale = 1.0 + intensity.value() / 200.0;
    let new_width = (f64::from(width) * scale).round();
    let new_height = (f64::from(height) / scale).round();

    if new_width > f64::from(MAX_WIDTH) || new_height > f64::from(MAX_HEIGHT) {
        return Err(TransformError::DimensionTooLarge {
            width: new_width,
            height: new_height,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
        });
    }

    // Written negated so NaN also lands here
    if !(new_width >= 1.0 && new_height >= 1.0) {
        return Err(TransformError::InvalidDimension {
            width: new_width,
            height: new_height,
        });
    }

    Ok((new_width as u32, new_height as u32))
}

/// Stretch the image horizontally and squash it vertically (or the reverse
/// for negative intensity), without preserving aspect ratio.
pub fn stretch<C: ImageCodec + ?Sized>(
    codec: &C,
    image: &[u8],
    intensity: Intensity,
) -> Result<Vec<u8>, TransformError> {
    let info = codec.probe(image)?;
    let (width, height) = stretch_dimensions(info.width, info.height, intensity)?;

    tracing::debug!(
        format = %info.format,
        from = %format!("{}x{}", info.width, info.height),
        to = %format!("{width}x{height}"),
        %intensity,
        "Stretching image"
    );

    Ok(codec.resize(image, width, height, Fit::Fill)?)
}

use crate::codec::{Fit, ImageCodec};
use crate::error::TransformError;
use crate::intensity::Intensity;

/// Scale factor `1 / (0.01 * intensity + 1)`: 1 at intensity 0, approaching
/// 0 as intensity grows.
pub fn resolution_multiplier(intensity: Intensity) -> Result<f64, TransformError> {
    if intensity.value() < 0.0 {
        return Err(TransformError::InvalidIntensity {
            intensity,
            minimum: 0.0,
        });
    }
    Ok(1.0 / (0.01 * intensity.value() + 1.0))
}

/// Both sides scaled by `multiplier`, floored, never below 1.
pub fn reduced_dimensions(width: u32, height: u32, multiplier: f64) -> (u32, u32) {
    let scale = |side: u32| ((f64::from(side) * multiplier).floor() as u32).max(1);
    (scale(width), scale(height))
}

/// Downscale the image uniformly.
///
/// Both target dimensions are computed here and passed with [`Fit::Fill`],
/// rather than relying on the codec to derive one side from the other.
pub fn reduce_resolution<C: ImageCodec + ?Sized>(
    codec: &C,
    image: &[u8],
    intensity: Intensity,
) -> Result<Vec<u8>, TransformError> {
    let multiplier = resolution_multiplier(intensity)?;
    let info = codec.probe(image)?;
    let (width, height) = reduced_dimensions(info.width, info.height, multiplier);

    tracing::debug!(
        format = %info.format,
        from = %format!("{}x{}", info.width, info.height),
        to = %format!("{width}x{height}"),
        %intensity,
        "Reducing resolution"
    );

    Ok(codec.resize(image, width, height, Fit::Fill)?)
}

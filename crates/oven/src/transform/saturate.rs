use crate::codec::ImageCodec;
use crate::error::TransformError;
use crate::intensity::Intensity;

const MIN_INTENSITY: f64 = -100.0;

/// Saturation multiplier `1 + intensity/100`; below -100 it would go negative.
pub fn saturation_multiplier(intensity: Intensity) -> Result<f32, TransformError> {
    if intensity.value() < MIN_INTENSITY {
        return Err(TransformError::InvalidIntensity {
            intensity,
            minimum: MIN_INTENSITY,
        });
    }
    Ok((1.0 + intensity.value() / 100.0) as f32)
}

/// Scale the image's color saturation. No upper bound on intensity.
pub fn saturate<C: ImageCodec + ?Sized>(
    codec: &C,
    image: &[u8],
    intensity: Intensity,
) -> Result<Vec<u8>, TransformError> {
    let multiplier = saturation_multiplier(intensity)?;
    tracing::debug!(%intensity, multiplier, "Adjusting saturation");
    Ok(codec.saturate(image, multiplier)?)
}

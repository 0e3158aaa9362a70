use crate::codec::{ImageCodec, Quality};
use crate::error::TransformError;
use crate::intensity::Intensity;

const MIN_INTENSITY: i64 = 1;
const MAX_INTENSITY: i64 = 100;

/// Encoder quality for an intensity: 1 maps to quality 100, 100 to quality 1.
pub fn quality_for(intensity: Intensity) -> Result<Quality, TransformError> {
    let value = intensity
        .as_integer()
        .ok_or(TransformError::NotInteger(intensity))?;

    if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&value) {
        return Err(TransformError::OutOfRange {
            intensity,
            min: MIN_INTENSITY,
            max: MAX_INTENSITY,
        });
    }

    // In range, so 1..=100 and the cast is lossless
    Ok(Quality::new((100 - (value - 1)) as u8))
}

/// Re-encode at a lower lossy quality, keeping the container format.
pub fn reduce_file_size<C: ImageCodec + ?Sized>(
    codec: &C,
    image: &[u8],
    intensity: Intensity,
) -> Result<Vec<u8>, TransformError> {
    let quality = quality_for(intensity)?;
    tracing::debug!(%intensity, quality = quality.value(), "Reducing file size");
    Ok(codec.reencode(image, quality)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mock::{MockCodec, RecordedOp};
    use crate::error::ErrorKind;

    fn intensity(value: f64) -> Intensity {
        Intensity::new(value).unwrap()
    }

    #[test]
    fn test_quality_inverts_intensity() {
        assert_eq!(quality_for(intensity(1.0)).unwrap(), Quality::BEST);
        assert_eq!(quality_for(intensity(100.0)).unwrap(), Quality::WORST);
        for i in 1..=100 {
            let quality = quality_for(intensity(i as f64)).unwrap();
            assert_eq!(i64::from(quality.value()), 100 - (i - 1));
        }
    }

    #[test]
    fn test_out_of_range() {
        for value in [0.0, -5.0, 101.0, 1000.0] {
            let err = quality_for(intensity(value)).unwrap_err();
            assert!(matches!(err, TransformError::OutOfRange { .. }), "{value}: {err}");
        }
    }

    #[test]
    fn test_non_integer() {
        for value in [0.5, 2.5, 99.9] {
            let err = quality_for(intensity(value)).unwrap_err();
            assert!(matches!(err, TransformError::NotInteger(_)), "{value}: {err}");
            assert_eq!(err.kind(), ErrorKind::InvalidIntensity);
        }
    }

    #[test]
    fn test_reencode_receives_quality() {
        let codec = MockCodec::with_dimensions(10, 10);
        reduce_file_size(&codec, b"input", intensity(1.0)).unwrap();
        reduce_file_size(&codec, b"input", intensity(100.0)).unwrap();
        reduce_file_size(&codec, b"input", intensity(30.0)).unwrap();
        assert_eq!(
            codec.operations(),
            vec![
                RecordedOp::Reencode { quality: 100 },
                RecordedOp::Reencode { quality: 1 },
                RecordedOp::Reencode { quality: 71 },
            ]
        );
    }

    #[test]
    fn test_invalid_intensity_never_reaches_codec() {
        let codec = MockCodec::with_dimensions(10, 10);
        assert!(reduce_file_size(&codec, b"input", intensity(0.0)).is_err());
        assert!(reduce_file_size(&codec, b"input", intensity(3.5)).is_err());
        assert!(codec.operations().is_empty());
    }
}

use crate::codec::CodecError;
use crate::intensity::Intensity;
use thiserror::Error;

/// Failure of a transform or of mode selection.
///
/// Every variant is a deterministic function of the input; none are worth
/// retrying. Messages are meant to be shown to the caller unchanged.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Given intensity '{intensity}' was invalid (<{minimum})")]
    InvalidIntensity { intensity: Intensity, minimum: f64 },

    #[error("Given intensity '{0}' wasn't integer")]
    NotInteger(Intensity),

    #[error("Given intensity '{intensity}' wasn't in range [{min}-{max}]")]
    OutOfRange {
        intensity: Intensity,
        min: i64,
        max: i64,
    },

    #[error(
        "Processed image resolution ({}x{}) would exceed maximum dimensions ({max_width}x{max_height})",
        dimension(.width),
        dimension(.height)
    )]
    DimensionTooLarge {
        width: f64,
        height: f64,
        max_width: u32,
        max_height: u32,
    },

    #[error(
        "Processed image resolution ({}x{}) was invalid",
        dimension(.width),
        dimension(.height)
    )]
    InvalidDimension { width: f64, height: f64 },

    #[error("Given mode '{0}' wasn't valid")]
    UnsupportedMode(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Computed dimension as shown to users; infinities read `Infinity`.
fn dimension(value: &f64) -> String {
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{sign}Infinity")
    } else {
        value.to_string()
    }
}

/// Coarse classification of a [`TransformError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidIntensity,
    UnsupportedMode,
    DimensionTooLarge,
    InvalidDimension,
    CodecFailure,
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::InvalidIntensity { .. }
            | TransformError::NotInteger(_)
            | TransformError::OutOfRange { .. } => ErrorKind::InvalidIntensity,
            TransformError::DimensionTooLarge { .. } => ErrorKind::DimensionTooLarge,
            TransformError::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            TransformError::UnsupportedMode(_) => ErrorKind::UnsupportedMode,
            TransformError::Codec(_) => ErrorKind::CodecFailure,
        }
    }
}

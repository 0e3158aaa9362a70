//! Routes a mode to its transform.

use crate::codec::{ImageCodec, ImageRsCodec};
use crate::error::TransformError;
use crate::intensity::Intensity;
use crate::mode::Mode;
use crate::transform;

/// Immutable mode table over a single codec.
///
/// Built once at startup and shared (typically behind an `Arc`). It holds no
/// mutable state, so concurrent calls for different requests need no
/// synchronization.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<C = ImageRsCodec> {
    codec: C,
}

impl<C: ImageCodec> Dispatcher<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Registered modes, in advertised order.
    pub fn modes(&self) -> &'static [Mode] {
        &Mode::ALL
    }

    /// Names of the registered modes, for request validation upstream.
    pub fn mode_names(&self) -> impl Iterator<Item = &'static str> {
        self.modes().iter().map(|mode| mode.name())
    }

    /// Resolve `mode` by name and apply it.
    ///
    /// An unknown name fails with [`TransformError::UnsupportedMode`] before
    /// any transform runs.
    pub fn process(
        &self,
        image: &[u8],
        mode: &str,
        intensity: Intensity,
    ) -> Result<Vec<u8>, TransformError> {
        let mode: Mode = mode.parse()?;
        self.apply(image, mode, intensity)
    }

    /// Apply an already resolved mode. Transform errors are returned as is.
    pub fn apply(
        &self,
        image: &[u8],
        mode: Mode,
        intensity: Intensity,
    ) -> Result<Vec<u8>, TransformError> {
        tracing::debug!(
            %mode,
            transform = mode.transform_name(),
            %intensity,
            input_bytes = image.len(),
            "Dispatching transform"
        );

        match mode {
            Mode::Normal => transform::stretch(&self.codec, image, intensity),
            Mode::Defrosting => transform::saturate(&self.codec, image, intensity),
            Mode::Grill => transform::reduce_file_size(&self.codec, image, intensity),
            Mode::Popcorn => transform::reduce_resolution(&self.codec, image, intensity),
        }
    }
}

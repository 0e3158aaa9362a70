//! Recording codec for transform and dispatcher tests.

use super::{CodecError, ContainerFormat, Fit, ImageCodec, ImageInfo, Quality};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Probe,
    Resize { width: u32, height: u32, fit: Fit },
    Saturate { multiplier: f32 },
    Reencode { quality: u8 },
}

/// Codec that records every call and answers `probe` with fixed metadata.
///
/// Uses Mutex (not RefCell) so it satisfies the `Send + Sync` bound.
pub struct MockCodec {
    info: ImageInfo,
    operations: Mutex<Vec<RecordedOp>>,
}

/// Bytes returned by every encoding operation.
pub const MOCK_OUTPUT: &[u8] = b"mock-output";

impl MockCodec {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            info: ImageInfo {
                width,
                height,
                format: ContainerFormat::Png,
            },
            operations: Mutex::new(Vec::new()),
        }
    }

    pub fn operations(&self) -> Vec<RecordedOp> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, op: RecordedOp) {
        self.operations.lock().unwrap().push(op);
    }
}

impl ImageCodec for MockCodec {
    fn probe(&self, _image: &[u8]) -> Result<ImageInfo, CodecError> {
        self.record(RecordedOp::Probe);
        Ok(self.info)
    }

    fn resize(
        &self,
        _image: &[u8],
        width: u32,
        height: u32,
        fit: Fit,
    ) -> Result<Vec<u8>, CodecError> {
        self.record(RecordedOp::Resize { width, height, fit });
        Ok(MOCK_OUTPUT.to_vec())
    }

    fn saturate(&self, _image: &[u8], multiplier: f32) -> Result<Vec<u8>, CodecError> {
        self.record(RecordedOp::Saturate { multiplier });
        Ok(MOCK_OUTPUT.to_vec())
    }

    fn reencode(&self, _image: &[u8], quality: Quality) -> Result<Vec<u8>, CodecError> {
        self.record(RecordedOp::Reencode {
            quality: quality.value(),
        });
        Ok(MOCK_OUTPUT.to_vec())
    }
}

//! One-shot commands that run the transforms without the HTTP server.

use anyhow::Context;
use oven::{ContainerFormat, Dispatcher, ImageCodec, Intensity, Mode};
use std::path::Path;

use crate::error::ApiError;
use crate::models::format_from_filename;

/// Outcome of [`process_file`], for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub mode: Mode,
    pub format: ContainerFormat,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

/// Transform `input` and write the result to `output`.
///
/// Applies the same intensity parsing and extension allow-list as the
/// `/process-image` endpoint; the file name of `input` selects the format.
pub fn process_file<C: ImageCodec>(
    dispatcher: &Dispatcher<C>,
    input: &Path,
    output: &Path,
    mode: &str,
    intensity: &str,
) -> anyhow::Result<ProcessSummary> {
    let intensity: Intensity = intensity.parse()?;
    let filename = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let format = format_from_filename(filename).ok_or(ApiError::UnsupportedFileType)?;
    let mode: Mode = mode.parse()?;

    let image = std::fs::read(input)
        .with_context(|| format!("Failed to read input image {}", input.display()))?;

    let cooked = dispatcher.apply(&image, mode, intensity)?;

    std::fs::write(output, &cooked)
        .with_context(|| format!("Failed to write output image {}", output.display()))?;

    tracing::info!(
        %mode,
        %intensity,
        %format,
        input = %input.display(),
        output = %output.display(),
        "Processed image"
    );

    Ok(ProcessSummary {
        mode,
        format,
        input_bytes: image.len(),
        output_bytes: cooked.len(),
    })
}

/// One line per mode: name and the transform it runs.
pub fn mode_listing() -> Vec<String> {
    Mode::ALL
        .iter()
        .map(|mode| format!("{:<12}{}", mode.name(), mode.transform_name()))
        .collect()
}

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use oven::{Dispatcher, Intensity, Mode};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{format_from_filename, ServerConfig};

/// Multipart form accepted by `/process-image`
#[derive(ToSchema)]
pub struct ProcessImageForm {
    /// Image file; the filename extension selects the response content type
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// One of the names listed by `/api/modes`
    pub mode: String,
    /// Transform strength as decimal text
    pub intensity: String,
}

/// Error body returned for every rejected request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Uploaded image part.
struct Upload {
    filename: String,
    data: Vec<u8>,
}

/// Form fields collected from the multipart body; each is `None` if absent or empty.
#[derive(Default)]
struct ProcessForm {
    upload: Option<Upload>,
    mode: Option<String>,
    intensity: Option<String>,
}

async fn read_form(
    multipart: &mut Multipart,
    max_upload_bytes: usize,
) -> Result<ProcessForm, ApiError> {
    let mut form = ProcessForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                // A file part without a filename carries no file
                let filename = match field.file_name() {
                    Some(filename) if !filename.is_empty() => filename.to_string(),
                    _ => continue,
                };
                let mut data = Vec::new();
                while let Some(chunk) = field.chunk().await? {
                    if data.len() + chunk.len() > max_upload_bytes {
                        tracing::warn!(
                            filename = %filename,
                            max_upload_bytes,
                            "Rejected oversized upload"
                        );
                        return Err(ApiError::UploadTooLarge);
                    }
                    data.extend_from_slice(&chunk);
                }
                form.upload = Some(Upload { filename, data });
            }
            Some("mode") => form.mode = Some(field.text().await?).filter(|v| !v.is_empty()),
            Some("intensity") => {
                form.intensity = Some(field.text().await?).filter(|v| !v.is_empty())
            }
            _ => {
                tracing::debug!(field = ?name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

/// Apply a transform to an uploaded image
///
/// Returns the transformed image in the container format of the upload.
#[utoipa::path(
    post,
    path = "/process-image",
    request_body(content = ProcessImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transformed image", content_type = "application/octet-stream"),
        (status = 400, description = "Missing or invalid parameter, or the transform failed", body = ErrorResponse),
        (status = 413, description = "Image exceeds the maximum file size", body = ErrorResponse),
        (status = 500, description = "Processing task failed", body = ErrorResponse),
    ),
    tag = "Processing"
)]
pub async fn handle_process_image(
    State(dispatcher): State<Arc<Dispatcher>>,
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(&mut multipart, config.max_upload_bytes).await?;

    let upload = form.upload.ok_or(ApiError::MissingParameter("Image"))?;
    let mode = form.mode.ok_or(ApiError::MissingParameter("Mode"))?;
    let intensity = form.intensity.ok_or(ApiError::MissingParameter("Intensity"))?;
    let intensity: Intensity = intensity.parse()?;
    let format = format_from_filename(&upload.filename).ok_or(ApiError::UnsupportedFileType)?;
    let mode: Mode = mode.parse()?;

    tracing::info!(
        %mode,
        %intensity,
        %format,
        filename = %upload.filename,
        bytes = upload.data.len(),
        "Processing image"
    );

    let data = upload.data;
    let result = tokio::task::spawn_blocking(move || dispatcher.apply(&data, mode, intensity))
        .await
        .map_err(|e| ApiError::Internal(format!("Transform task failed: {e}")))?;

    let output = result.map_err(|e| {
        tracing::warn!(%mode, %intensity, error = %e, kind = ?e.kind(), "Transform failed");
        ApiError::from(e)
    })?;

    tracing::debug!(%mode, output_bytes = output.len(), "Image processed");

    Ok(([(header::CONTENT_TYPE, format.mime_type())], output).into_response())
}

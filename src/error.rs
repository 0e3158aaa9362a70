use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oven::{ParseIntensityError, TransformError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} wasn't provided")]
    MissingParameter(&'static str),

    #[error(transparent)]
    InvalidIntensity(#[from] ParseIntensityError),

    #[error("Uploaded file type wasn't supported")]
    UnsupportedFileType,

    #[error("Image exceeds the maximum file size")]
    UploadTooLarge,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingParameter(_)
            | ApiError::InvalidIntensity(_)
            | ApiError::UnsupportedFileType
            | ApiError::Multipart(_)
            | ApiError::Transform(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::UploadTooLarge
        } else {
            ApiError::Multipart(e.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the log
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "Request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use oven::Intensity;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_missing_parameter_messages() {
        assert_eq!(
            ApiError::MissingParameter("Image").to_string(),
            "Image wasn't provided"
        );
        assert_eq!(
            ApiError::MissingParameter("Intensity").to_string(),
            "Intensity wasn't provided"
        );
    }

    #[test]
    fn test_invalid_intensity_passes_parse_message_through() {
        let parse_error = "abc".parse::<Intensity>().unwrap_err();
        let error: ApiError = parse_error.into();
        assert_eq!(error.to_string(), "Given intensity 'abc' wasn't a number");
    }

    #[test]
    fn test_transform_error_message_is_unchanged() {
        let error: ApiError = TransformError::UnsupportedMode("Boil".to_string()).into();
        assert_eq!(error.to_string(), "Given mode 'Boil' wasn't valid");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingParameter("Mode").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::UnsupportedFileType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Multipart("bad boundary".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Transform(TransformError::UnsupportedMode("x".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UploadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal("join error".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_body_carries_message() {
        let (status, json) = body_json(ApiError::UnsupportedFileType).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Uploaded file type wasn't supported");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, json) = body_json(ApiError::Internal("task panicked".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
    }
}

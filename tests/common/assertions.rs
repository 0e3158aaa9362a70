//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a JSON error with the given status and message
pub fn assert_error(response: &TestResponse, expected_status: StatusCode, expected_message: &str) {
    assert_status(response, expected_status);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["error"].as_str(),
        Some(expected_message),
        "Unexpected error body: {}",
        response.text()
    );
}

/// Assert response is a 400 with the given message
pub fn assert_bad_request(response: &TestResponse, expected_message: &str) {
    assert_error(response, StatusCode::BAD_REQUEST, expected_message);
}

/// Assert response is an image with the expected content type and dimensions
pub fn assert_image(
    response: &TestResponse,
    content_type: &str,
    expected_format: image::ImageFormat,
    expected_size: (u32, u32),
) {
    assert_ok(response);
    assert_eq!(response.header("content-type"), Some(content_type));
    assert_eq!(
        image::guess_format(&response.body).ok(),
        Some(expected_format),
        "Unexpected container format"
    );
    let decoded = response.image();
    assert_eq!((decoded.width(), decoded.height()), expected_size);
}

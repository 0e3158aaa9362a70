//! Server integration tests that test the actual server behavior.
//!
//! These tests start a real TCP server and verify behavior that can only
//! be tested with actual network connections.

mod common;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use common::fixtures::png;
use common::MultipartForm;
use microwave::models::ServerConfig;
use microwave::server::{build_router, create_app_state};

/// Start a test server on an available port and return the port number.
async fn start_test_server() -> u16 {
    let app = build_router(create_app_state(ServerConfig::default()));

    // Bind to port 0 to get an available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    port
}

/// Send a raw request with `Connection: close` and read the full response.
async fn roundtrip(port: u16, head: &str, body: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to connect");

    stream
        .write_all(head.as_bytes())
        .await
        .expect("Failed to write request head");
    stream
        .write_all(body)
        .await
        .expect("Failed to write request body");

    let mut response = Vec::new();
    tokio::time::timeout(
        tokio::time::Duration::from_secs(10),
        stream.read_to_end(&mut response),
    )
    .await
    .expect("Timed out reading response")
    .expect("Failed to read response");
    response
}

#[tokio::test]
async fn test_health_over_tcp() {
    let port = start_test_server().await;

    let response = roundtrip(
        port,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        b"",
    )
    .await;

    let response = String::from_utf8_lossy(&response);
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.ends_with("OK"), "got: {response}");
}

#[tokio::test]
async fn test_process_image_over_tcp() {
    let port = start_test_server().await;

    let form = MultipartForm::new()
        .file("image", "photo.png", &png(100, 200))
        .text("mode", "Popcorn")
        .text("intensity", "100");
    let content_type = form.content_type();
    let body = form.into_body();
    let head = format!(
        "POST /process-image HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        content_type,
        body.len()
    );

    let response = roundtrip(port, &head, &body).await;

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("Response has no header terminator");
    let head = String::from_utf8_lossy(&response[..split]).to_lowercase();
    assert!(head.starts_with("http/1.1 200"), "got: {head}");
    assert!(head.contains("content-type: image/png"), "got: {head}");

    let decoded = image::load_from_memory(&response[split + 4..]).expect("Body is not an image");
    assert_eq!((decoded.width(), decoded.height()), (50, 100));
}

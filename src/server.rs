//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Router,
};
use oven::{Dispatcher, ImageRsCodec};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::ServerConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub config: Arc<ServerConfig>,
}

/// Create application state with the production codec.
pub fn create_app_state(config: ServerConfig) -> AppState {
    AppState {
        dispatcher: Arc::new(Dispatcher::new(ImageRsCodec::new())),
        config: Arc::new(config),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. The request
/// body limit is derived from the configured upload limit.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes();

    Router::new()
        .route("/", get(api::handle_root))
        .route("/process-image", post(handle_process_image))
        .route("/api/modes", get(handle_modes))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_process_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<axum::response::Response, ApiError> {
    api::handle_process_image(State(state.dispatcher), State(state.config), multipart).await
}

async fn handle_modes(State(state): State<AppState>) -> axum::Json<api::ModesResponse> {
    api::handle_modes(State(state.dispatcher)).await
}

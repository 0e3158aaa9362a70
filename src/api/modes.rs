use axum::{extract::State, response::Json};
use oven::Dispatcher;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Available transform modes
#[derive(Debug, Serialize, ToSchema)]
pub struct ModesResponse {
    /// Mode names accepted by `/process-image`, in advertised order
    pub modes: Vec<String>,
}

/// List the accepted modes
#[utoipa::path(
    get,
    path = "/api/modes",
    responses(
        (status = 200, description = "Mode names", body = ModesResponse),
    ),
    tag = "Processing"
)]
pub async fn handle_modes(State(dispatcher): State<Arc<Dispatcher>>) -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: dispatcher.mode_names().map(str::to_string).collect(),
    })
}

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String),
    ),
    tag = "Service"
)]
pub async fn handle_root() -> &'static str {
    "You've landed on root path"
}

//! HTTP route handlers for the renewal server.

pub mod predict;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::dto::StatusResponse;
use crate::view::render_page;
use crate::ServerState;

/// Health check endpoint. Liveness only; ignores readiness.
pub async fn health() -> &'static str {
    "ok"
}

/// GET / - The empty form.
pub async fn home() -> Html<String> {
    Html(render_page(None))
}

/// GET /status - Whether artifacts are loaded.
pub async fn status(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: state.inference.is_ready(),
    })
}

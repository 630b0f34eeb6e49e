//! Observability HTTP Routes
//!
//! Landing page and health check.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use super::state::MenuState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create landing and health routes
pub fn health_routes(state: Arc<MenuState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn home_handler() -> Html<&'static str> {
    Html("<h1>Pizza Management API</h1>")
}

/// Reports `ok` when the database answers, `unavailable` otherwise
async fn health_handler(State(state): State<Arc<MenuState>>) -> impl IntoResponse {
    let (status, label) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(response))
}

//! HTTP gateway (Axum) for browser frontends.
//!
//! The core state machine runs wherever the assessor's UI runs; this layer
//! is the thin server-side plumbing a browser frontend talks to: a search
//! endpoint that shields the Elasticsearch instance behind a fixed query
//! shape, and an export endpoint that turns judgments into a downloadable
//! qrel file.
//!
//! This module is primarily used by the `qrel-judge` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{export_handler, search_handler};
pub use state::GatewayState;

use crate::backend::SearchBackend;

/// Builds the gateway router over a search backend.
pub fn create_router_with_state<B>(state: GatewayState<B>) -> Router
where
    B: SearchBackend + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/search", post(search_handler))
        .route("/export", post(export_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

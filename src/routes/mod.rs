// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tower_http::cors::{Any, CorsLayer};

use crate::engine::Engine;
use crate::error::EngineError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) engine: Engine,
    pub(crate) ws_connections: Arc<AtomicUsize>,
}

pub fn app(engine: Engine, ws_connections: Arc<AtomicUsize>) -> Router {
    let state = AppState {
        engine,
        ws_connections,
    };
    Router::new()
        .route("/", get(|| async { "simdash: simulated studio and mining dashboards" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/snapshot", get(http::snapshot_handler)) // GET /api/snapshot
        .route("/api/sources/active", post(http::bulk_active_handler)) // POST /api/sources/active
        .route("/api/sources/{id}", get(http::source_handler)) // GET /api/sources/{id}
        .route("/api/sources/{id}/toggle", post(http::toggle_handler)) // POST /api/sources/{id}/toggle
        .route(
            "/api/sources/{id}/parameters/{key}",
            put(http::parameter_handler),
        ) // PUT /api/sources/{id}/parameters/{key}
        .route("/api/aggregate/{scope}", get(http::aggregate_handler)) // GET /api/aggregate/{scope}
        .route("/api/transport/bpm", put(http::bpm_handler)) // PUT /api/transport/bpm
        .route("/api/transport/volume", put(http::volume_handler)) // PUT /api/transport/volume
        .route("/api/transport/{command}", post(http::transport_handler)) // POST /api/transport/{command}
        .route("/api/timeline", get(http::timeline_handler)) // GET /api/timeline
        .route("/api/timeline/{command}", post(http::timeline_command_handler)) // POST /api/timeline/{command}
        .route("/ws/dashboard", get(ws::ws_dashboard)) // WS /ws/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Engine error rendered as `{ "error": message }` with a matching status.
pub(crate) struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EngineError::NotFound { .. } | EngineError::UnknownParameter { .. } => {
                StatusCode::NOT_FOUND
            }
            EngineError::OutOfRange { .. } | EngineError::NotASwitch { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EngineError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(error = %self.0, status = status.as_u16(), "request rejected");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

// JSON handlers: version, snapshots, toggles, parameters, transport, timeline

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::models::{
    AggregateView, Domain, SourceSnapshot, TimelineCommand, TimelineView, Transport,
    TransportCommand,
};
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct BulkActive {
    active: bool,
    #[serde(default)]
    domain: Option<Domain>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ValueBody {
    value: f64,
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/snapshot: everything a dashboard needs to render.
pub(super) async fn snapshot_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.snapshot().await)
}

pub(super) async fn source_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SourceSnapshot>, ApiError> {
    Ok(Json(state.engine.source(&id).await?))
}

/// GET /api/aggregate/{scope}: `mining`, `track`, `effect`, `studio` or `all`.
pub(super) async fn aggregate_handler(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Json<AggregateView>, ApiError> {
    let view = match scope.as_str() {
        "studio" => state.engine.studio_aggregate().await,
        "all" => state.engine.aggregate_all().await,
        other => state.engine.aggregate(other.parse::<Domain>()?).await,
    };
    Ok(Json(view))
}

pub(super) async fn toggle_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SourceSnapshot>, ApiError> {
    state.engine.toggle(&id).await?;
    Ok(Json(state.engine.source(&id).await?))
}

/// POST /api/sources/active: start/stop all sources, or one domain when given.
pub(super) async fn bulk_active_handler(
    State(state): State<AppState>,
    Json(body): Json<BulkActive>,
) -> Json<AggregateView> {
    let view = match body.domain {
        Some(domain) => state.engine.set_domain_active(domain, body.active).await,
        None => state.engine.set_all_active(body.active).await,
    };
    Json(view)
}

pub(super) async fn parameter_handler(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
    Json(body): Json<ValueBody>,
) -> Result<Json<SourceSnapshot>, ApiError> {
    Ok(Json(
        state.engine.update_parameter(&id, &key, body.value).await?,
    ))
}

pub(super) async fn transport_handler(
    State(state): State<AppState>,
    Path(command): Path<String>,
) -> Result<Json<Transport>, ApiError> {
    let command: TransportCommand = command.parse()?;
    Ok(Json(state.engine.transport(command).await))
}

pub(super) async fn bpm_handler(
    State(state): State<AppState>,
    Json(body): Json<ValueBody>,
) -> Result<Json<Transport>, ApiError> {
    Ok(Json(state.engine.set_bpm(body.value).await?))
}

pub(super) async fn volume_handler(
    State(state): State<AppState>,
    Json(body): Json<ValueBody>,
) -> Result<Json<Transport>, ApiError> {
    Ok(Json(state.engine.set_master_volume(body.value).await?))
}

pub(super) async fn timeline_handler(State(state): State<AppState>) -> Json<TimelineView> {
    Json(state.engine.timeline().await)
}

pub(super) async fn timeline_command_handler(
    State(state): State<AppState>,
    Path(command): Path<String>,
) -> Result<Json<TimelineView>, ApiError> {
    let command: TimelineCommand = command.parse()?;
    Ok(Json(state.engine.timeline_command(command).await))
}

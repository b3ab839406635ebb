//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Snapshot};
use super::responses::{
    ApiResponse, HealthResponse, IntervalsRequest, PhaseTimeRequest, SettingsResponse, StatusResponse,
};

/// Wrap a state result in the common response envelope
fn respond(action: &str, result: Result<Snapshot, String>) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            let message = format!("{} applied, session is {}", action, snapshot.stage);
            Ok(Json(ApiResponse::new(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", state.start())
}

/// Handle POST /pause - Pause the running phase
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause())
}

/// Handle POST /skip - Skip to the next phase
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("skip", state.skip())
}

/// Handle POST /reset - Reset the session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset())
}

/// Handle PUT /settings/intervals - Set the interval count
pub async fn intervals_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntervalsRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let raw = request.value.as_text();
    info!("Interval count input: {:?}", raw);
    respond("set intervals", state.set_interval_count(&raw))
}

/// Handle PUT /settings/hang - Set the hang time
pub async fn hang_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PhaseTimeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let (minutes, seconds) = (request.minutes.as_text(), request.seconds.as_text());
    info!("Hang time input: {:?}:{:?}", minutes, seconds);
    respond("set hang time", state.set_hang_time(&minutes, &seconds))
}

/// Handle PUT /settings/rest - Set the rest time
pub async fn rest_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PhaseTimeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let (minutes, seconds) = (request.minutes.as_text(), request.seconds.as_text());
    info!("Rest time input: {:?}:{:?}", minutes, seconds);
    respond("set rest time", state.set_rest_time(&minutes, &seconds))
}

/// Handle GET /settings - Return the current settings
pub async fn settings_handler(State(state): State<Arc<AppState>>) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.get_settings() {
        Ok(settings) => Ok(Json(SettingsResponse::from(settings))),
        Err(e) => {
            error!("Failed to get settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the session snapshot and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        label: snapshot.label.to_string(),
        snapshot,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

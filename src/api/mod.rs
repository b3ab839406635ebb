//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::{
    hang_handler, health_handler, intervals_handler, pause_handler, reset_handler, rest_handler,
    settings_handler, skip_handler, start_handler, status_handler,
};

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/skip", post(skip_handler))
        .route("/reset", post(reset_handler))
        .route("/settings", get(settings_handler))
        .route("/settings/intervals", put(intervals_handler))
        .route("/settings/hang", put(hang_handler))
        .route("/settings/rest", put(rest_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

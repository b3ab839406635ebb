//! Clock driver background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{clock::ClockEvent, state::AppState};

/// Background task that feeds clock events into the session
pub async fn clock_driver_task(state: Arc<AppState>, mut events: mpsc::UnboundedReceiver<ClockEvent>) {
    info!("Starting clock driver task");

    while let Some(event) = events.recv().await {
        match state.handle_clock_event(event) {
            Ok(Some(cue)) => debug!("Clock event {:?} produced cue {:?}", event.kind, cue),
            Ok(None) => {}
            Err(e) => error!("Failed to apply clock event: {}", e),
        }
    }

    info!("Clock channel closed, stopping clock driver task");
}

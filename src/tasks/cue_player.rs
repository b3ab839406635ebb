//! Cue player background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    cue::{dispatch, CuePlayer},
    state::AppState,
};

/// Background task that plays every cue the session emits
pub async fn cue_player_task<P>(state: Arc<AppState>, player: P)
where
    P: CuePlayer + Send + 'static,
{
    info!("Starting cue player task");

    let mut cue_rx = state.cue_tx.subscribe();

    loop {
        match cue_rx.recv().await {
            Ok(cue) => dispatch(cue, &player),
            Err(RecvError::Lagged(skipped)) => {
                // Late cues are worthless, carry on with the next one
                warn!("Cue player fell behind, dropped {} cues", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Cue channel closed, stopping cue player task");
                break;
            }
        }
    }
}

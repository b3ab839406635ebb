//! Hangboard Timer - a hang/rest interval timer
//!
//! This is the main entry point for the hangboard-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use hangboard_timer::{
    api::create_router,
    clock::TokioClock,
    config::Config,
    services::TerminalCuePlayer,
    state::AppState,
    tasks::{clock_driver_task, cue_player_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hangboard_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting hangboard-timer v{}", env!("CARGO_PKG_VERSION"));

    let settings = config.settings();
    info!(
        "Configuration: host={}, port={}, intervals={}, hang={}s, rest={}s",
        config.host,
        config.port,
        settings.interval_count(),
        settings.hang_duration(),
        settings.rest_duration()
    );

    // Create application state around a tokio-backed clock
    let (clock, clock_events) = TokioClock::channel();
    let state = Arc::new(AppState::new(config.port, config.host.clone(), settings, clock));

    // Feed clock events into the session
    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        clock_driver_task(driver_state, clock_events).await;
    });

    // Play cues as they are emitted
    let player_state = Arc::clone(&state);
    let player = TerminalCuePlayer::new(config.bell);
    tokio::spawn(async move {
        cue_player_task(player_state, player).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start              - Start or resume the session");
    info!("  POST /pause              - Pause the running phase");
    info!("  POST /skip               - Skip to the next phase");
    info!("  POST /reset              - Reset the session");
    info!("  GET  /settings           - Current settings");
    info!("  PUT  /settings/intervals - Set the interval count");
    info!("  PUT  /settings/hang      - Set the hang time");
    info!("  PUT  /settings/rest      - Set the rest time");
    info!("  GET  /status             - Session snapshot");
    info!("  GET  /health             - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

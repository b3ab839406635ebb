//! Hangboard Timer - a hang/rest interval timer
//!
//! The library holds the interval state machine, its countdown clocks and
//! cue scheduling. The binary hosts one session behind a local HTTP API.

pub mod config;
pub mod clock;
pub mod cue;
pub mod display;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use clock::{ClockEvent, ManualClock, PhaseClock, TokioClock};
pub use cue::Cue;
pub use state::{AppState, IntervalStateMachine, Settings, Snapshot, Stage};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod clock_driver;
pub mod cue_player;

// Re-export main functions
pub use clock_driver::clock_driver_task;
pub use cue_player::cue_player_task;

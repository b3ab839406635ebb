//! External collaborator module
//!
//! This module contains the players that turn cues into something a person
//! can hear.

pub mod audio;

// Re-export main types
pub use audio::TerminalCuePlayer;

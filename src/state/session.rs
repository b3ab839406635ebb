//! Session record for one interval workout

use serde::{Deserialize, Serialize};

/// Length of the preparation countdown in seconds
pub const PREPARE_SECONDS: u32 = 3;

/// Phase of the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    NotStarted,
    Hang,
    Rest,
    Complete,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::NotStarted => "not started",
            Stage::Hang => "hang",
            Stage::Rest => "rest",
            Stage::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation counter tying clock events to the arming that produced them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunToken(u64);

impl RunToken {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Mutable state of the running workout, owned by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub stage: Stage,
    /// 1-based index of the current Rest/Hang pair
    pub current_interval: u32,
    /// Interval count captured when the session was started
    pub total_intervals: u32,
    /// Phase lengths captured when the session was started
    pub hang_duration: u32,
    pub rest_duration: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub is_preparing: bool,
    pub prepare_remaining: u32,
    pub run_token: RunToken,
}

impl Session {
    /// Create a session that has not started yet
    pub fn new() -> Self {
        Self {
            stage: Stage::NotStarted,
            current_interval: 1,
            total_intervals: 0,
            hang_duration: 0,
            rest_duration: 0,
            remaining_seconds: 0,
            is_running: false,
            is_preparing: false,
            prepare_remaining: PREPARE_SECONDS,
            run_token: RunToken::default(),
        }
    }

    /// Whether a phase is under way and currently paused
    pub fn is_paused(&self) -> bool {
        matches!(self.stage, Stage::Rest | Stage::Hang) && !self.is_running && !self.is_preparing
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

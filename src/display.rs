//! Values handed to the rendering side: time labels and progress

use serde::Serialize;

use crate::state::Stage;

/// Remaining time split for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTime {
    pub minutes: String,
    pub seconds: String,
}

/// Split seconds into unpadded minutes and two-digit seconds
pub fn format_time(total_seconds: u32) -> FormattedTime {
    FormattedTime {
        minutes: (total_seconds / 60).to_string(),
        seconds: format!("{:02}", total_seconds % 60),
    }
}

/// What the time label in the middle of the ring should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimeLabel {
    Preparing { remaining: u32 },
    Idle,
    Complete,
    /// Used from one minute up
    Clock { stage: Stage, minutes: String, seconds: String },
    Seconds { stage: Stage, seconds: u32 },
}

impl TimeLabel {
    pub fn new(stage: Stage, is_preparing: bool, prepare_remaining: u32, remaining: u32) -> Self {
        if is_preparing {
            return TimeLabel::Preparing { remaining: prepare_remaining };
        }
        match stage {
            Stage::NotStarted => TimeLabel::Idle,
            Stage::Complete => TimeLabel::Complete,
            Stage::Hang | Stage::Rest if remaining >= 60 => {
                let FormattedTime { minutes, seconds } = format_time(remaining);
                TimeLabel::Clock { stage, minutes, seconds }
            }
            Stage::Hang | Stage::Rest => TimeLabel::Seconds { stage, seconds: remaining },
        }
    }
}

impl std::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeLabel::Preparing { remaining } => write!(f, "Resuming in {} seconds...", remaining),
            TimeLabel::Idle => f.write_str("HANGBOARD TIMER"),
            TimeLabel::Complete => f.write_str("Complete!"),
            TimeLabel::Clock { stage, minutes, seconds } => {
                write!(f, "{} {}:{} minutes", stage.as_str().to_uppercase(), minutes, seconds)
            }
            TimeLabel::Seconds { stage, seconds } => {
                write!(f, "{} {} seconds", stage.as_str().to_uppercase(), seconds)
            }
        }
    }
}

/// Direction the countdown ring moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RingMotion {
    Growing,
    Shrinking,
    Static,
}

impl From<Stage> for RingMotion {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Rest => RingMotion::Growing,
            Stage::Hang => RingMotion::Shrinking,
            Stage::NotStarted | Stage::Complete => RingMotion::Static,
        }
    }
}

/// Interval progress for the segmented ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u32,
    pub max: u32,
}

impl Progress {
    /// A session that has not started shows as empty, even with one interval
    pub fn new(stage: Stage, current_interval: u32, max: u32) -> Self {
        let current = match stage {
            Stage::NotStarted => 0,
            _ => current_interval.min(max),
        };
        Self { current, max }
    }

    /// Fill state of each ring segment
    pub fn segments(&self) -> Vec<bool> {
        (0..self.max).map(|i| i < self.current).collect()
    }
}

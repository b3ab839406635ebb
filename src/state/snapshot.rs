//! Read-only view of the session for the control surface

use serde::Serialize;

use super::{Session, Settings, Stage};
use crate::display::{format_time, Progress, RingMotion, TimeLabel};

/// Which controls are actionable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub skip: bool,
    pub reset: bool,
}

impl Controls {
    pub fn new(session: &Session, can_start: bool) -> Self {
        let idle = !session.is_running && !session.is_preparing;
        Self {
            // From Complete, start acts as a reset
            start: idle && (session.stage == Stage::Complete || can_start),
            pause: session.is_running,
            skip: session.is_running && !session.is_preparing && session.stage != Stage::Complete,
            reset: session.stage != Stage::NotStarted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stage: Stage,
    pub current_interval: u32,
    pub total_intervals: u32,
    pub remaining_seconds: u32,
    pub is_preparing: bool,
    pub prepare_remaining: u32,
    pub is_running: bool,
    pub can_start: bool,
    pub controls_enabled: Controls,
    pub settings_editable: bool,
    pub progress: Progress,
    pub motion: RingMotion,
    pub formatted_minutes: String,
    pub formatted_seconds: String,
    pub label: TimeLabel,
}

impl Snapshot {
    pub fn capture(session: &Session, settings: &Settings) -> Self {
        let can_start = settings.can_start();
        // Before start the configured count is what the next run will use
        let total_intervals = match session.stage {
            Stage::NotStarted => settings.interval_count(),
            _ => session.total_intervals,
        };
        let formatted = format_time(session.remaining_seconds);

        Self {
            stage: session.stage,
            current_interval: session.current_interval,
            total_intervals,
            remaining_seconds: session.remaining_seconds,
            is_preparing: session.is_preparing,
            prepare_remaining: session.prepare_remaining,
            is_running: session.is_running,
            can_start,
            controls_enabled: Controls::new(session, can_start),
            settings_editable: matches!(session.stage, Stage::NotStarted | Stage::Complete),
            progress: Progress::new(session.stage, session.current_interval, total_intervals),
            motion: RingMotion::from(session.stage),
            formatted_minutes: formatted.minutes,
            formatted_seconds: formatted.seconds,
            label: TimeLabel::new(
                session.stage,
                session.is_preparing,
                session.prepare_remaining,
                session.remaining_seconds,
            ),
        }
    }
}

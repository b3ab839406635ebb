//! Interval state machine
//!
//! ```text
//! NotStarted --start--> [prepare] --> Rest(1)
//! Rest(i)    --expire--> Hang(i)
//! Hang(i)    --expire--> Rest(i + 1)   while i < N
//! Hang(N)    --expire--> Complete
//! ```
//!
//! The interval count and phase lengths are captured from [`Settings`] at
//! start; later edits only apply to the next session.
//!
//! The machine owns the [`Session`] and the clock. Every arming or
//! cancellation of the clock moves the session to a fresh [`RunToken`], so
//! events from an earlier arming are recognised and dropped in
//! [`IntervalStateMachine::handle`]. Control calls made out of turn are
//! no-ops.

use tracing::{debug, info};

use super::{
    session::PREPARE_SECONDS,
    RunToken, Session, Settings, Snapshot, Stage,
};
use crate::{
    clock::{ClockEvent, ClockEventKind, PhaseClock},
    cue::{self, Cue},
};

#[derive(Debug)]
pub struct IntervalStateMachine<C> {
    settings: Settings,
    session: Session,
    clock: C,
}

impl<C: PhaseClock> IntervalStateMachine<C> {
    pub fn new(settings: Settings, clock: C) -> Self {
        Self {
            settings,
            session: Session::new(),
            clock,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn run_token(&self) -> RunToken {
        self.session.run_token
    }

    pub fn can_start(&self) -> bool {
        self.settings.can_start()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, &self.settings)
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_interval_count(&mut self, raw: &str) {
        self.settings.set_interval_count(raw);
    }

    pub fn set_hang_time(&mut self, minutes: &str, seconds: &str) {
        self.settings.set_hang_time(minutes, seconds);
    }

    pub fn set_rest_time(&mut self, minutes: &str, seconds: &str) {
        self.settings.set_rest_time(minutes, seconds);
    }

    // ── Controls ─────────────────────────────────────────────────────

    /// Start a new session or resume a paused one
    ///
    /// Both go through the preparation countdown first. Returns the cue for
    /// the first second of that countdown. From `Complete` this only resets.
    pub fn start(&mut self) -> Option<Cue> {
        if self.session.is_running || self.session.is_preparing {
            debug!("Start ignored, session already under way");
            return None;
        }
        if self.session.stage == Stage::Complete {
            self.reset();
            return None;
        }
        if !self.settings.can_start() {
            debug!("Start ignored, settings are not startable");
            return None;
        }

        if self.session.stage == Stage::NotStarted {
            self.session.total_intervals = self.settings.interval_count();
            self.session.hang_duration = self.settings.hang_duration();
            self.session.rest_duration = self.settings.rest_duration();
            self.session.current_interval = 1;
            self.session.stage = Stage::Rest;
            self.session.remaining_seconds = self.session.rest_duration;
            info!(
                "Starting session: {} intervals, hang {}s, rest {}s",
                self.session.total_intervals, self.session.hang_duration, self.session.rest_duration
            );
        } else {
            info!(
                "Resuming {} {} with {}s left",
                self.session.stage, self.session.current_interval, self.session.remaining_seconds
            );
        }

        self.enter_preparation()
    }

    /// Stop the clock and keep the remaining time
    pub fn pause(&mut self) {
        if !self.session.is_running {
            debug!("Pause ignored, session not running");
            return;
        }
        if self.session.remaining_seconds == 0 {
            // The phase ran out and its expiry is still in flight
            self.on_expire();
            if !self.session.is_running {
                return;
            }
        }
        self.halt();
        self.session.is_running = false;
        info!(
            "Paused {} {} with {}s left",
            self.session.stage, self.session.current_interval, self.session.remaining_seconds
        );
    }

    /// End the current phase now and move on
    pub fn skip(&mut self) {
        if !self.session.is_running || self.session.is_preparing || self.session.stage == Stage::Complete {
            debug!("Skip ignored in {} (running={})", self.session.stage, self.session.is_running);
            return;
        }
        info!("Skipping {} {}", self.session.stage, self.session.current_interval);
        self.on_expire();
    }

    /// Drop the session and go back to `NotStarted`
    pub fn reset(&mut self) {
        self.halt();
        self.session = Session {
            run_token: self.session.run_token,
            ..Session::new()
        };
        info!("Session reset");
    }

    // ── Clock events ─────────────────────────────────────────────────

    /// Apply a clock event, returning the cue it calls for
    pub fn handle(&mut self, event: ClockEvent) -> Option<Cue> {
        if event.token != self.session.run_token {
            debug!(
                "Discarding stale clock event {:?} (token {}, current {})",
                event.kind,
                event.token.generation(),
                self.session.run_token.generation()
            );
            return None;
        }

        match event.kind {
            ClockEventKind::Tick { remaining } => {
                if self.session.is_preparing {
                    self.session.prepare_remaining = remaining.min(PREPARE_SECONDS);
                } else if self.session.is_running {
                    self.session.remaining_seconds = remaining;
                } else {
                    return None;
                }
                cue::evaluate(
                    self.session.remaining_seconds,
                    self.session.stage,
                    self.session.is_preparing,
                    self.session.prepare_remaining,
                )
            }
            ClockEventKind::Expired => {
                if self.session.is_preparing {
                    self.finish_preparation();
                } else if self.session.is_running {
                    self.on_expire();
                }
                None
            }
        }
    }

    fn enter_preparation(&mut self) -> Option<Cue> {
        self.session.is_running = false;
        self.session.is_preparing = true;
        self.session.prepare_remaining = PREPARE_SECONDS;
        self.rearm(PREPARE_SECONDS);
        cue::evaluate(
            self.session.remaining_seconds,
            self.session.stage,
            true,
            self.session.prepare_remaining,
        )
    }

    fn finish_preparation(&mut self) {
        self.session.is_preparing = false;
        self.session.prepare_remaining = PREPARE_SECONDS;
        self.session.is_running = true;
        debug!("Preparation done, running {} for {}s", self.session.stage, self.session.remaining_seconds);
        self.rearm(self.session.remaining_seconds);
    }

    fn on_expire(&mut self) {
        match self.session.stage {
            Stage::Rest => self.enter_phase(Stage::Hang),
            Stage::Hang if self.session.current_interval < self.session.total_intervals => {
                self.session.current_interval += 1;
                self.enter_phase(Stage::Rest);
            }
            Stage::Hang => self.complete(),
            Stage::NotStarted | Stage::Complete => {}
        }
    }

    fn enter_phase(&mut self, stage: Stage) {
        let duration = match stage {
            Stage::Hang => self.session.hang_duration,
            _ => self.session.rest_duration,
        };
        self.session.stage = stage;
        self.session.remaining_seconds = duration;
        info!(
            "Entering {} {}/{} for {}s",
            stage, self.session.current_interval, self.session.total_intervals, duration
        );
        self.rearm(duration);
    }

    fn complete(&mut self) {
        self.halt();
        self.session.stage = Stage::Complete;
        self.session.is_running = false;
        self.session.remaining_seconds = 0;
        info!("Session complete after {} intervals", self.session.total_intervals);
    }

    /// Replace the live clock with a new countdown under a new token
    fn rearm(&mut self, duration_secs: u32) {
        self.clock.cancel();
        self.session.run_token = self.session.run_token.next();
        self.clock.arm(i64::from(duration_secs), self.session.run_token);
    }

    /// Stop the live clock and invalidate its outstanding events
    fn halt(&mut self) {
        self.clock.cancel();
        self.session.run_token = self.session.run_token.next();
    }
}

//! One-second countdown clocks
//!
//! A clock counts an armed duration down to zero and reports every second
//! as a [`ClockEvent`] tagged with the [`RunToken`] it was armed with. After
//! the tick that reports 0 the clock emits exactly one `Expired` event for
//! that token. Receivers must compare tokens before acting: a cancelled
//! clock may still have an event in flight.

use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::state::RunToken;

/// Tick period of every clock
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEventKind {
    Tick { remaining: u32 },
    Expired,
}

/// Event delivered by a clock for one arming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockEvent {
    pub token: RunToken,
    pub kind: ClockEventKind,
}

impl ClockEvent {
    pub fn tick(token: RunToken, remaining: u32) -> Self {
        Self { token, kind: ClockEventKind::Tick { remaining } }
    }

    pub fn expired(token: RunToken) -> Self {
        Self { token, kind: ClockEventKind::Expired }
    }
}

/// Countdown shared by the clock implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Start a countdown; a negative duration is treated as 0
    pub fn new(duration_secs: i64) -> Self {
        let remaining = u32::try_from(duration_secs.max(0)).unwrap_or(u32::MAX);
        Self { remaining }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Consume one second and return what is left
    pub fn step(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Events produced by one second of this countdown
    pub fn step_events(&mut self, token: RunToken) -> Vec<ClockEvent> {
        let remaining = self.step();
        let mut events = vec![ClockEvent::tick(token, remaining)];
        if remaining == 0 {
            events.push(ClockEvent::expired(token));
        }
        events
    }
}

/// The countdown primitive driven by the state machine
pub trait PhaseClock {
    /// Start counting `duration_secs` down, replacing any live countdown
    fn arm(&mut self, duration_secs: i64, token: RunToken);

    /// Stop the live countdown, if any
    fn cancel(&mut self);
}

/// Clock backed by a tokio task per arming
#[derive(Debug)]
pub struct TokioClock {
    events: mpsc::UnboundedSender<ClockEvent>,
    cancel: Option<oneshot::Sender<()>>,
}

impl TokioClock {
    /// Create a clock together with the receiver its events arrive on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClockEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        (Self { events, cancel: None }, events_rx)
    }

    /// Whether a countdown task is currently live
    pub fn is_armed(&self) -> bool {
        self.cancel.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

impl PhaseClock for TokioClock {
    fn arm(&mut self, duration_secs: i64, token: RunToken) {
        self.cancel();

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        self.cancel = Some(cancel_tx);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut countdown = Countdown::new(duration_secs);
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            debug!("Clock armed for {}s (token {})", countdown.remaining(), token.generation());

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let batch = countdown.step_events(token);
                        let expired = countdown.remaining() == 0;
                        if batch.into_iter().any(|event| events.send(event).is_err()) {
                            debug!("Clock receiver dropped, stopping countdown");
                            break;
                        }
                        if expired {
                            break;
                        }
                    }
                    // Fires on cancel() and when the clock itself is dropped
                    _ = &mut cancel_rx => {
                        debug!("Clock cancelled (token {})", token.generation());
                        break;
                    }
                }
            }
        });
    }

    fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel.take() {
            let _ = cancel_tx.send(());
        }
    }
}

/// Clock advanced by hand, one second per [`ManualClock::advance`] call
#[derive(Debug, Default)]
pub struct ManualClock {
    armed: Option<(Countdown, RunToken)>,
    arm_count: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one second pass and return the events it produced
    pub fn advance(&mut self) -> Vec<ClockEvent> {
        let Some((countdown, token)) = self.armed.as_mut() else {
            return Vec::new();
        };
        let events = countdown.step_events(*token);
        if countdown.remaining() == 0 {
            self.armed = None;
        }
        events
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Remaining seconds and token of the live countdown
    pub fn armed(&self) -> Option<(u32, RunToken)> {
        self.armed.map(|(countdown, token)| (countdown.remaining(), token))
    }

    /// How many times the clock has been armed
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }
}

impl PhaseClock for ManualClock {
    fn arm(&mut self, duration_secs: i64, token: RunToken) {
        self.armed = Some((Countdown::new(duration_secs), token));
        self.arm_count += 1;
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}

//! Shared application state for the server

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{IntervalStateMachine, Settings, Snapshot};
use crate::{
    clock::{ClockEvent, TokioClock},
    cue::Cue,
};

pub type Machine = IntervalStateMachine<TokioClock>;

/// Main application state holding the single interval session
#[derive(Debug)]
pub struct AppState {
    /// The interval state machine; every mutation goes through this lock
    pub machine: Mutex<Machine>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Cues for the audio side
    pub cue_tx: broadcast::Sender<Cue>,
    /// Latest snapshot for watchers
    pub snapshot_tx: watch::Sender<Snapshot>,
}

impl AppState {
    pub fn new(port: u16, host: String, settings: Settings, clock: TokioClock) -> Self {
        let machine = IntervalStateMachine::new(settings, clock);
        let (cue_tx, _) = broadcast::channel(32);
        let (snapshot_tx, _) = watch::channel(machine.snapshot());

        Self {
            machine: Mutex::new(machine),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            cue_tx,
            snapshot_tx,
        }
    }

    /// Run a control against the machine and publish what came out of it
    pub fn apply<F>(&self, action: &str, control: F) -> Result<Snapshot, String>
    where
        F: FnOnce(&mut Machine) -> Option<Cue>,
    {
        let mut machine = self.machine.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let cue = control(&mut *machine);
        let snapshot = machine.snapshot();
        drop(machine);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish(cue, &snapshot);
        Ok(snapshot)
    }

    pub fn start(&self) -> Result<Snapshot, String> {
        info!("Start requested");
        self.apply("start", |machine| machine.start())
    }

    pub fn pause(&self) -> Result<Snapshot, String> {
        info!("Pause requested");
        self.apply("pause", |machine| {
            machine.pause();
            None
        })
    }

    pub fn skip(&self) -> Result<Snapshot, String> {
        info!("Skip requested");
        self.apply("skip", |machine| {
            machine.skip();
            None
        })
    }

    pub fn reset(&self) -> Result<Snapshot, String> {
        info!("Reset requested");
        self.apply("reset", |machine| {
            machine.reset();
            None
        })
    }

    pub fn set_interval_count(&self, raw: &str) -> Result<Snapshot, String> {
        self.apply("set-intervals", |machine| {
            machine.set_interval_count(raw);
            None
        })
    }

    pub fn set_hang_time(&self, minutes: &str, seconds: &str) -> Result<Snapshot, String> {
        self.apply("set-hang", |machine| {
            machine.set_hang_time(minutes, seconds);
            None
        })
    }

    pub fn set_rest_time(&self, minutes: &str, seconds: &str) -> Result<Snapshot, String> {
        self.apply("set-rest", |machine| {
            machine.set_rest_time(minutes, seconds);
            None
        })
    }

    /// Feed one clock event to the machine
    pub fn handle_clock_event(&self, event: ClockEvent) -> Result<Option<Cue>, String> {
        let mut machine = self.machine.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let cue = machine.handle(event);
        let snapshot = machine.snapshot();
        drop(machine);

        self.publish(cue, &snapshot);
        Ok(cue)
    }

    fn publish(&self, cue: Option<Cue>, snapshot: &Snapshot) {
        if let Some(cue) = cue {
            // No receivers just means nobody is playing sounds
            if self.cue_tx.send(cue).is_err() {
                debug!("No cue listeners for {:?}", cue);
            }
        }

        self.snapshot_tx.send_if_modified(|current| {
            if *current != *snapshot {
                *current = snapshot.clone();
                true
            } else {
                false
            }
        });
    }

    /// Get the current session snapshot
    pub fn get_snapshot(&self) -> Result<Snapshot, String> {
        self.machine.lock()
            .map(|machine| machine.snapshot())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Get the current settings
    pub fn get_settings(&self) -> Result<Settings, String> {
        self.machine.lock()
            .map(|machine| machine.settings().clone())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

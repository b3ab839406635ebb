//! Terminal cue player

use std::io::Write;
use tracing::{debug, info};

use crate::cue::CuePlayer;

/// Plays cues by logging them and, optionally, ringing the terminal bell
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCuePlayer {
    bell: bool,
}

impl TerminalCuePlayer {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }

    fn ring(&self, times: usize) {
        if !self.bell {
            return;
        }
        let mut stdout = std::io::stdout();
        let bells = "\x07".repeat(times);
        if let Err(e) = stdout.write_all(bells.as_bytes()).and_then(|_| stdout.flush()) {
            debug!("Failed to ring terminal bell: {}", e);
        }
    }
}

impl CuePlayer for TerminalCuePlayer {
    fn play_countdown(&self) {
        info!("Cue: countdown");
        self.ring(1);
    }

    fn play_go(&self) {
        info!("Cue: go");
        self.ring(2);
    }
}

//! Audio/visual cue scheduling
//!
//! Cues are advisory. The state machine decides when one is due and hands it
//! to whoever listens; nothing waits for delivery.

use serde::{Deserialize, Serialize};

use crate::state::Stage;

/// Signal for the audio/visual collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cue {
    /// Short beep for the last seconds of a countdown
    Countdown,
    /// The countdown reached zero
    Go,
}

/// Decide which cue, if any, belongs to the current moment
pub fn evaluate(remaining: u32, stage: Stage, is_preparing: bool, prepare_remaining: u32) -> Option<Cue> {
    if is_preparing {
        return match prepare_remaining {
            0 => Some(Cue::Go),
            1..=3 => Some(Cue::Countdown),
            _ => None,
        };
    }

    if stage == Stage::NotStarted {
        return None;
    }

    match remaining {
        0 => Some(Cue::Go),
        1..=3 => Some(Cue::Countdown),
        _ => None,
    }
}

/// Something that can make a cue heard or seen
pub trait CuePlayer {
    fn play_countdown(&self);
    fn play_go(&self);
}

/// Route a cue to the matching player call
pub fn dispatch<P: CuePlayer + ?Sized>(cue: Cue, player: &P) {
    match cue {
        Cue::Countdown => player.play_countdown(),
        Cue::Go => player.play_go(),
    }
}

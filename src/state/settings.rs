//! Interval settings and input validation
//!
//! Every field is set from raw text, the way a form field would deliver it.
//! Input that fails validation is dropped and the previous value stays.
//! A cleared field is held as blank so it can be retyped, and counts as 0.

use serde::Serialize;
use tracing::debug;

/// Largest accepted interval count
pub const MAX_INTERVALS: u32 = 45;
/// Largest accepted minute or second component
pub const MAX_COMPONENT: u32 = 59;
/// Longest raw input accepted for any field
pub const MAX_INPUT_LEN: usize = 2;

/// Convert a minutes/seconds pair to a total number of seconds
pub fn duration(minutes: u32, seconds: u32) -> u32 {
    minutes * 60 + seconds
}

/// Outcome of validating one raw field input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// Empty input, held transiently
    Blank,
    /// A value inside the field's range
    Value(u32),
    /// Anything else; the stored value must not change
    Rejected,
}

impl FieldInput {
    /// Classify raw text against an inclusive range
    pub fn parse(raw: &str, min: u32, max: u32) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return FieldInput::Blank;
        }
        if raw.len() > MAX_INPUT_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return FieldInput::Rejected;
        }
        match raw.parse::<u32>() {
            Ok(value) if (min..=max).contains(&value) => FieldInput::Value(value),
            _ => FieldInput::Rejected,
        }
    }

    /// Apply this input to a stored field, returning whether it was accepted
    fn apply_to(self, field: &mut Option<u32>) -> bool {
        match self {
            FieldInput::Blank => {
                *field = None;
                true
            }
            FieldInput::Value(value) => {
                *field = Some(value);
                true
            }
            FieldInput::Rejected => false,
        }
    }
}

/// Validated interval configuration
///
/// `None` marks a blank field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    interval_count: Option<u32>,
    hang_minutes: Option<u32>,
    hang_seconds: Option<u32>,
    rest_minutes: Option<u32>,
    rest_seconds: Option<u32>,
}

impl Settings {
    /// Create settings with the stock 3 x (00:30 rest, 00:10 hang) workout
    pub fn new() -> Self {
        Self {
            interval_count: Some(3),
            hang_minutes: Some(0),
            hang_seconds: Some(10),
            rest_minutes: Some(0),
            rest_seconds: Some(30),
        }
    }

    pub fn set_interval_count(&mut self, raw: &str) {
        Self::set_field("interval count", &mut self.interval_count, raw, 1, MAX_INTERVALS);
    }

    pub fn set_hang_minutes(&mut self, raw: &str) {
        Self::set_field("hang minutes", &mut self.hang_minutes, raw, 0, MAX_COMPONENT);
    }

    pub fn set_hang_seconds(&mut self, raw: &str) {
        Self::set_field("hang seconds", &mut self.hang_seconds, raw, 0, MAX_COMPONENT);
    }

    pub fn set_rest_minutes(&mut self, raw: &str) {
        Self::set_field("rest minutes", &mut self.rest_minutes, raw, 0, MAX_COMPONENT);
    }

    pub fn set_rest_seconds(&mut self, raw: &str) {
        Self::set_field("rest seconds", &mut self.rest_seconds, raw, 0, MAX_COMPONENT);
    }

    /// Set both hang components; each is validated on its own
    pub fn set_hang_time(&mut self, minutes: &str, seconds: &str) {
        self.set_hang_minutes(minutes);
        self.set_hang_seconds(seconds);
    }

    /// Set both rest components; each is validated on its own
    pub fn set_rest_time(&mut self, minutes: &str, seconds: &str) {
        self.set_rest_minutes(minutes);
        self.set_rest_seconds(seconds);
    }

    fn set_field(name: &str, field: &mut Option<u32>, raw: &str, min: u32, max: u32) {
        if !FieldInput::parse(raw, min, max).apply_to(field) {
            debug!("Ignoring {} input {:?}, keeping {:?}", name, raw, field);
        }
    }

    /// Interval count, with a blank field read as 0
    pub fn interval_count(&self) -> u32 {
        self.interval_count.unwrap_or(0)
    }

    pub fn hang_minutes(&self) -> Option<u32> {
        self.hang_minutes
    }

    pub fn hang_seconds(&self) -> Option<u32> {
        self.hang_seconds
    }

    pub fn rest_minutes(&self) -> Option<u32> {
        self.rest_minutes
    }

    pub fn rest_seconds(&self) -> Option<u32> {
        self.rest_seconds
    }

    /// Hang phase length in seconds
    pub fn hang_duration(&self) -> u32 {
        duration(self.hang_minutes.unwrap_or(0), self.hang_seconds.unwrap_or(0))
    }

    /// Rest phase length in seconds
    pub fn rest_duration(&self) -> u32 {
        duration(self.rest_minutes.unwrap_or(0), self.rest_seconds.unwrap_or(0))
    }

    /// Whether a session can be started with these settings
    pub fn can_start(&self) -> bool {
        self.interval_count() > 0 && self.hang_duration() > 0 && self.rest_duration() > 0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

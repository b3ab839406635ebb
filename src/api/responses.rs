//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Settings, Snapshot};

/// Raw setting input, accepted as JSON text, a JSON number or any other value
///
/// Anything that is not text or an integer is kept as its JSON rendering so
/// field validation rejects it like any other bad input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Text(String),
    Number(i64),
    Other(serde_json::Value),
}

impl RawInput {
    /// The input as the text a form field would have held
    pub fn as_text(&self) -> String {
        match self {
            RawInput::Text(text) => text.clone(),
            RawInput::Number(number) => number.to_string(),
            RawInput::Other(value) => value.to_string(),
        }
    }
}

/// Body of PUT /settings/intervals
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalsRequest {
    pub value: RawInput,
}

/// Body of PUT /settings/hang and PUT /settings/rest
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseTimeRequest {
    pub minutes: RawInput,
    pub seconds: RawInput,
}

/// API response structure for control and settings endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: Snapshot,
}

impl ApiResponse {
    /// Create a new API response, with a status derived from the snapshot
    pub fn new(message: String, snapshot: Snapshot) -> Self {
        let status = if snapshot.is_preparing {
            "preparing"
        } else if snapshot.is_running {
            "running"
        } else {
            "idle"
        };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            snapshot,
        }
    }
}

/// Settings response with derived phase durations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub settings: Settings,
    pub hang_duration: u32,
    pub rest_duration: u32,
    pub can_start: bool,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            hang_duration: settings.hang_duration(),
            rest_duration: settings.rest_duration(),
            can_start: settings.can_start(),
            settings,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub snapshot: Snapshot,
    pub label: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

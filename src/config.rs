//! Configuration and CLI argument handling

use clap::Parser;
use tracing::warn;

use crate::state::{
    settings::{FieldInput, MAX_COMPONENT, MAX_INTERVALS},
    Settings,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "hangboard-timer")]
#[command(about = "A hang/rest interval timer with a local HTTP control panel")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Number of rest/hang intervals (1-45)
    #[arg(short, long, default_value = "3")]
    pub intervals: String,

    /// Hang phase minutes (0-59)
    #[arg(long, default_value = "0")]
    pub hang_minutes: String,

    /// Hang phase seconds (0-59)
    #[arg(long, default_value = "10")]
    pub hang_seconds: String,

    /// Rest phase minutes (0-59)
    #[arg(long, default_value = "0")]
    pub rest_minutes: String,

    /// Rest phase seconds (0-59)
    #[arg(long, default_value = "30")]
    pub rest_seconds: String,

    /// Ring the terminal bell on countdown and go cues
    #[arg(long)]
    pub bell: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the starting settings, validating the arguments like form input
    ///
    /// An argument that fails validation leaves the built-in default.
    pub fn settings(&self) -> Settings {
        warn_if_rejected("intervals", &self.intervals, 1, MAX_INTERVALS);
        warn_if_rejected("hang-minutes", &self.hang_minutes, 0, MAX_COMPONENT);
        warn_if_rejected("hang-seconds", &self.hang_seconds, 0, MAX_COMPONENT);
        warn_if_rejected("rest-minutes", &self.rest_minutes, 0, MAX_COMPONENT);
        warn_if_rejected("rest-seconds", &self.rest_seconds, 0, MAX_COMPONENT);

        let mut settings = Settings::new();
        settings.set_interval_count(&self.intervals);
        settings.set_hang_time(&self.hang_minutes, &self.hang_seconds);
        settings.set_rest_time(&self.rest_minutes, &self.rest_seconds);

        if !settings.can_start() {
            warn!(
                "Configured session cannot start yet (intervals={}, hang={}s, rest={}s)",
                settings.interval_count(),
                settings.hang_duration(),
                settings.rest_duration()
            );
        }

        settings
    }
}

fn warn_if_rejected(arg: &str, raw: &str, min: u32, max: u32) {
    if FieldInput::parse(raw, min, max) == FieldInput::Rejected {
        warn!("Ignoring --{} {:?}, keeping the default", arg, raw);
    }
}

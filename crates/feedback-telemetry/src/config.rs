//! Telemetry configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or a directive list)
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Log file; `None` logs to stderr
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "feedback-qr".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FEEDBACK_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `FEEDBACK_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `FEEDBACK_LOG_FILE`: Log file path (default: stderr)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: defaults.service_name,

            log_level: env::var("FEEDBACK_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env::var("FEEDBACK_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),

            log_file: env::var("FEEDBACK_LOG_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Send logs to `path` (used while a TUI owns the terminal).
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

//! # Feedback Telemetry
//!
//! Structured logging for Feedback-QR, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feedback_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! tracing::info!("ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FEEDBACK_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `FEEDBACK_JSON_LOGS` | `false` | JSON formatted logs |
//! | `FEEDBACK_LOG_FILE` | unset | Write logs to this file instead of stderr |

mod config;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::init_telemetry;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

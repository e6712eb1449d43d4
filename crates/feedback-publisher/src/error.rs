//! Error types for the feedback publisher

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while committing feedback to the content store
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Object already exists or conflicts: {message}")]
    Conflict { message: String },

    #[error("Store rejected request with status {status}: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Store reported no download URL for {path}")]
    MissingDownloadUrl { path: String },
}

impl PublishError {
    /// Whether the store answered and refused the write, as opposed to the
    /// request never completing.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::Forbidden { .. }
                | Self::RateLimited { .. }
                | Self::Conflict { .. }
                | Self::Rejected { .. }
        )
    }
}

/// Errors from store configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Configuration field `{0}` cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid directory: {0} (must not start or end with '/')")]
    InvalidDirectory(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

/// Errors from the presentation state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Presentation already resolved")]
    AlreadyResolved,
}

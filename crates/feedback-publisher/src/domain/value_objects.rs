//! # Value Objects
//!
//! Small immutable values with construction-time guarantees.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// File extension of every feedback object.
pub const FEEDBACK_FILE_EXTENSION: &str = "md";

/// Public download address of a published feedback object.
///
/// Never empty: a store answer without an address is a failure, not an
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishedAddress(String);

impl PublishedAddress {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return None;
        }
        Some(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PublishedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of a feedback object: `{directory}/{timestamp_ms}.md`.
///
/// Unique only to millisecond resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    directory: String,
    timestamp_ms: u64,
}

impl StoragePath {
    pub fn new(directory: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            directory: directory.into(),
            timestamp_ms,
        }
    }

    /// `{timestamp_ms}.md`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.timestamp_ms, FEEDBACK_FILE_EXTENSION)
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.directory, self.file_name())
    }
}

/// Store access token that zeroizes on drop and never prints.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
    inner: String,
}

impl AccessToken {
    /// Returns `None` for empty input.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let inner = token.into();
        if inner.trim().is_empty() {
            return None;
        }
        Some(Self { inner })
    }

    /// Expose the raw token (use immediately, do not log).
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

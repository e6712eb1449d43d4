//! Outbound Ports (Driven Ports)
//!
//! Dependencies the publisher needs from the outside world: somewhere to
//! write objects, and a clock to name them by.

use async_trait::async_trait;

use crate::domain::PublishReceipt;
use crate::error::PublishError;

/// A single "create object" call.
///
/// Owner, repository and branch belong to the store adapter's configuration;
/// the request only carries what changes per publish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateObjectRequest {
    /// Path of the new object, relative to the repository root
    pub path: String,
    /// Commit message
    pub message: String,
    /// Object content, standard base64
    pub content_base64: String,
}

/// Versioned object store (Driven Port)
///
/// Treated as an append-only namespace. Implementations must not retry.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a new object and return where it can be downloaded.
    async fn create_object(&self, request: CreateObjectRequest) -> Result<PublishReceipt, PublishError>;
}

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        // Clock before the Unix epoch reads as 0 rather than panicking
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemTimeSource.now_millis() > 1_577_836_800_000);
    }
}

//! Inbound Ports (Driving Ports)
//!
//! The API an activation uses to publish a composed document.

use async_trait::async_trait;

use crate::domain::{FeedbackDocument, PublishReceipt};
use crate::error::PublishError;

/// Primary publish API (Driving Port)
#[async_trait]
pub trait FeedbackPublisherApi: Send + Sync {
    /// Commit `document` as a new object in the content store.
    ///
    /// Performs exactly one remote write. No retry, no read-before-write.
    ///
    /// # Arguments
    /// * `document` - The composed feedback
    /// * `challenge_title` - Embedded in the commit message
    ///
    /// # Returns
    /// The store's receipt, carrying the public download address
    async fn publish(
        &self,
        document: &FeedbackDocument,
        challenge_title: &str,
    ) -> Result<PublishReceipt, PublishError>;
}

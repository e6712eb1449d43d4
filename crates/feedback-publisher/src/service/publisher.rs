//! Feedback Publisher Service
//!
//! Names, encodes and submits one feedback object per call.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{commit_message, FeedbackDocument, PublishReceipt, StoragePath, StoreConfig};
use crate::error::PublishError;
use crate::ports::{ContentStore, CreateObjectRequest, FeedbackPublisherApi, SystemTimeSource, TimeSource};

/// Feedback Publisher implementation
///
/// Implements the `FeedbackPublisherApi` port using injected dependencies.
pub struct FeedbackPublisher<S: ContentStore + ?Sized, T: TimeSource = SystemTimeSource> {
    /// Content store (driven port)
    store: Arc<S>,
    /// Clock used to name objects
    time_source: T,
    /// Directory prefix for every object
    directory: String,
}

impl<S: ContentStore + ?Sized> FeedbackPublisher<S> {
    /// Create a publisher that names objects by the wall clock
    pub fn new(store: Arc<S>, config: &StoreConfig) -> Self {
        Self::with_time_source(store, config, SystemTimeSource)
    }
}

impl<S: ContentStore + ?Sized, T: TimeSource> FeedbackPublisher<S, T> {
    /// Create with a custom time source
    pub fn with_time_source(store: Arc<S>, config: &StoreConfig, time_source: T) -> Self {
        Self {
            store,
            time_source,
            directory: config.directory.clone(),
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// Build the create request for `document`, reading the clock once.
    ///
    /// The same timestamp names the file and goes into the commit message.
    pub fn prepare_request(&self, document: &FeedbackDocument, challenge_title: &str) -> CreateObjectRequest {
        let timestamp_ms = self.time_source.now_millis();
        let path = StoragePath::new(self.directory.as_str(), timestamp_ms);

        CreateObjectRequest {
            path: path.to_string(),
            message: commit_message(challenge_title, timestamp_ms),
            content_base64: document.to_base64(),
        }
    }
}

#[async_trait]
impl<S, T> FeedbackPublisherApi for FeedbackPublisher<S, T>
where
    S: ContentStore + ?Sized + 'static,
    T: TimeSource + 'static,
{
    async fn publish(
        &self,
        document: &FeedbackDocument,
        challenge_title: &str,
    ) -> Result<PublishReceipt, PublishError> {
        let request = self.prepare_request(document, challenge_title);
        let path = request.path.clone();

        debug!(
            path = %path,
            document_bytes = document.len(),
            "Submitting feedback object"
        );

        let receipt = self.store.create_object(request).await?;

        info!(
            path = %receipt.path,
            address = %receipt.address,
            "Feedback published"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compose, Challenge, PublishedAddress};
    use base64::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// Mock content store for testing
    struct MockStore {
        requests: Mutex<Vec<CreateObjectRequest>>,
        fail: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn requests(&self) -> Vec<CreateObjectRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentStore for MockStore {
        async fn create_object(&self, request: CreateObjectRequest) -> Result<PublishReceipt, PublishError> {
            let path = request.path.clone();
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(PublishError::Conflict {
                    message: "sha wasn't supplied".into(),
                });
            }
            Ok(PublishReceipt {
                address: PublishedAddress::new(format!("https://example.com/{path}")).unwrap(),
                path,
                content_sha: None,
                commit_sha: None,
            })
        }
    }

    /// Clock that advances one millisecond per reading
    struct SteppingClock(AtomicU64);

    impl TimeSource for SteppingClock {
        fn now_millis(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn publisher(store: Arc<MockStore>, start_ms: u64) -> FeedbackPublisher<MockStore, SteppingClock> {
        FeedbackPublisher::with_time_source(store, &StoreConfig::default(), SteppingClock(AtomicU64::new(start_ms)))
    }

    fn document() -> FeedbackDocument {
        compose(&Challenge::new("Off-by-one", "Fix the loop bound."), "for i in range(n+1): ...")
    }

    #[test]
    fn test_prepare_request_shares_one_timestamp() {
        let publisher = publisher(Arc::new(MockStore::new()), 1_700_000_000_123);
        let request = publisher.prepare_request(&document(), "Off-by-one");

        assert_eq!(request.path, "feedbacks/1700000000123.md");
        assert_eq!(
            request.message,
            "Add user feedback for Off-by-one. timestamp: 1700000000123"
        );
    }

    #[test]
    fn test_prepare_request_payload_decodes_to_document() {
        let publisher = publisher(Arc::new(MockStore::new()), 1);
        let doc = document();
        let request = publisher.prepare_request(&doc, "Off-by-one");

        let decoded = BASE64_STANDARD.decode(&request.content_base64).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), doc.as_str());
    }

    #[tokio::test]
    async fn test_publish_makes_exactly_one_write() {
        let store = Arc::new(MockStore::new());
        let publisher = publisher(store.clone(), 42);

        let receipt = publisher.publish(&document(), "Off-by-one").await.unwrap();

        assert_eq!(receipt.address.as_str(), "https://example.com/feedbacks/42.md");
        assert_eq!(store.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_propagates_store_error_without_retry() {
        let store = Arc::new(MockStore::failing());
        let publisher = publisher(store.clone(), 42);

        let err = tokio_test::assert_err!(publisher.publish(&document(), "Off-by-one").await);

        assert!(matches!(err, PublishError::Conflict { .. }));
        assert_eq!(store.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_publishes_use_distinct_names() {
        let store = Arc::new(MockStore::new());
        let publisher = publisher(store.clone(), 1_000);

        tokio_test::assert_ok!(publisher.publish(&document(), "Off-by-one").await);
        tokio_test::assert_ok!(publisher.publish(&document(), "Off-by-one").await);

        let paths: Vec<String> = store.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["feedbacks/1000.md", "feedbacks/1001.md"]);
    }
}

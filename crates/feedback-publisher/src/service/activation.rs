//! One-shot publish activation.
//!
//! An activation composes the document up front, then runs a single publish
//! on a background task and resolves the presentation exactly once. The
//! caller never sees a publish error; it only sees the resulting state.
//!
//! Teardown cancels the activation's token. The request already in flight
//! is not aborted, but its outcome is dropped instead of being applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::{compose, Challenge, Presentation, View};
use crate::ports::FeedbackPublisherApi;

/// Cancellation flag shared between an activation and its publish task.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Entry point for starting activations.
pub struct Activation;

impl Activation {
    /// Start one activation. Must be called inside a Tokio runtime.
    ///
    /// The inputs are owned by the activation, so later changes on the
    /// caller's side cannot re-trigger or alter the publish.
    pub fn start<P>(publisher: Arc<P>, challenge: Challenge, answer: impl Into<String>) -> ActivationHandle
    where
        P: FeedbackPublisherApi + ?Sized + 'static,
    {
        Self::start_with_token(publisher, challenge, answer, CancellationToken::new())
    }

    /// Start one activation bound to an externally owned token.
    pub fn start_with_token<P>(
        publisher: Arc<P>,
        challenge: Challenge,
        answer: impl Into<String>,
        token: CancellationToken,
    ) -> ActivationHandle
    where
        P: FeedbackPublisherApi + ?Sized + 'static,
    {
        let answer = answer.into();
        let document = compose(&challenge, &answer);
        let (state_tx, state_rx) = watch::channel(Presentation::new());

        debug!(
            title = %challenge.title,
            document_bytes = document.len(),
            "Activation started"
        );

        let task_token = token.clone();
        let task = tokio::spawn(async move {
            let outcome = publisher.publish(&document, &challenge.title).await;

            if task_token.is_cancelled() {
                debug!(title = %challenge.title, "Activation torn down; dropping publish outcome");
                return;
            }

            let resolution = match outcome {
                Ok(receipt) => {
                    info!(address = %receipt.address, "Feedback ready");
                    Ok(receipt.address)
                }
                Err(e) => {
                    error!(error = %e, title = %challenge.title, "Failed to publish feedback");
                    Err(e.to_string())
                }
            };

            state_tx.send_modify(|presentation| {
                if let Err(e) = presentation.resolve(resolution) {
                    warn!(error = %e, "Ignoring second resolution");
                }
            });
        });

        ActivationHandle {
            state_rx,
            token,
            task: Some(task),
        }
    }
}

/// Handle to a running activation.
///
/// Dropping the handle tears the activation down.
pub struct ActivationHandle {
    state_rx: watch::Receiver<Presentation>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ActivationHandle {
    /// Receiver notified when the presentation resolves.
    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.state_rx.clone()
    }

    /// Snapshot of the presentation.
    pub fn presentation(&self) -> Presentation {
        self.state_rx.borrow().clone()
    }

    pub fn view(&self) -> View {
        self.state_rx.borrow().view()
    }

    pub fn error_flag(&self) -> bool {
        self.state_rx.borrow().error_flag()
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Suppress the pending state update.
    pub fn teardown(&mut self) {
        if !self.token.is_cancelled() {
            debug!("Tearing down activation");
        }
        self.token.cancel();
    }

    /// Wait for the publish task to finish and return the final presentation.
    ///
    /// After a teardown this is whatever state was current at teardown.
    pub async fn wait(mut self) -> Presentation {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Publish task aborted");
            }
        }
        self.presentation()
    }
}

impl Drop for ActivationHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PresentationState, PublishReceipt, PublishedAddress, StoreConfig};
    use crate::error::PublishError;
    use crate::ports::{ContentStore, CreateObjectRequest, TimeSource};
    use crate::service::FeedbackPublisher;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU64;
    use std::sync::Mutex;
    use tokio::sync::Semaphore;

    enum Reply {
        Address(&'static str),
        Fail,
    }

    /// Mock store that blocks each write until a permit is released
    struct GatedStore {
        gate: Semaphore,
        reply: Reply,
        paths: Mutex<Vec<String>>,
    }

    impl GatedStore {
        fn new(reply: Reply) -> Self {
            Self {
                gate: Semaphore::new(0),
                reply,
                paths: Mutex::new(Vec::new()),
            }
        }

        fn open(reply: Reply) -> Self {
            let store = Self::new(reply);
            store.gate.add_permits(16);
            store
        }

        fn release(&self) {
            self.gate.add_permits(1);
        }

        fn paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentStore for GatedStore {
        async fn create_object(&self, request: CreateObjectRequest) -> Result<PublishReceipt, PublishError> {
            self.paths.lock().unwrap().push(request.path.clone());
            let _permit = self.gate.acquire().await.expect("gate closed");

            match self.reply {
                Reply::Address(url) => Ok(PublishReceipt {
                    address: PublishedAddress::new(url).unwrap(),
                    path: request.path,
                    content_sha: None,
                    commit_sha: None,
                }),
                Reply::Fail => Err(PublishError::Unauthorized {
                    message: "Bad credentials".into(),
                }),
            }
        }
    }

    struct SteppingClock(AtomicU64);

    impl TimeSource for SteppingClock {
        fn now_millis(&self) -> u64 {
            self.0.fetch_add(7, Ordering::SeqCst)
        }
    }

    fn publisher(store: Arc<GatedStore>) -> Arc<FeedbackPublisher<GatedStore, SteppingClock>> {
        Arc::new(FeedbackPublisher::with_time_source(
            store,
            &StoreConfig::default(),
            SteppingClock(AtomicU64::new(1_700_000_000_000)),
        ))
    }

    fn challenge() -> Challenge {
        Challenge::new("Off-by-one", "Fix the loop bound.")
    }

    async fn let_task_run() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_success_renders_code_only_after_resolution() {
        let store = Arc::new(GatedStore::new(Reply::Address("https://example.com/feedbacks/123.md")));
        let handle = Activation::start(publisher(store.clone()), challenge(), "for i in range(n+1): ...");

        let_task_run().await;
        assert!(matches!(handle.view(), View::Placeholder { .. }));
        assert_eq!(store.paths().len(), 1);

        store.release();
        let presentation = handle.wait().await;

        assert_eq!(
            presentation.view(),
            View::Code {
                payload: "https://example.com/feedbacks/123.md".to_string()
            }
        );
        assert!(!presentation.error_flag());
    }

    #[tokio::test]
    async fn test_failure_records_flag_and_never_renders_code() {
        let store = Arc::new(GatedStore::open(Reply::Fail));
        let handle = Activation::start(publisher(store), challenge(), "x");

        let presentation = handle.wait().await;

        assert!(presentation.error_flag());
        assert!(presentation.address().is_none());
        match presentation.view() {
            View::Failed { reason } => assert!(reason.contains("Bad credentials")),
            other => panic!("expected failure view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_subscriber_sees_single_transition() {
        let store = Arc::new(GatedStore::new(Reply::Address("https://example.com/feedbacks/1.md")));
        let handle = Activation::start(publisher(store.clone()), challenge(), "x");
        let mut rx = handle.subscribe();

        assert_eq!(rx.borrow().state(), &PresentationState::Pending);
        store.release();
        rx.changed().await.unwrap();

        assert!(matches!(rx.borrow().state(), PresentationState::Ready(_)));
        handle.wait().await;
    }

    #[tokio::test]
    async fn test_teardown_suppresses_state_update() {
        let store = Arc::new(GatedStore::new(Reply::Address("https://example.com/feedbacks/1.md")));
        let mut handle = Activation::start(publisher(store.clone()), challenge(), "x");
        let rx = handle.subscribe();

        let_task_run().await;
        handle.teardown();
        assert!(handle.is_torn_down());
        store.release();

        let presentation = handle.wait().await;

        // The write still happened; only the update was dropped.
        assert_eq!(store.paths().len(), 1);
        assert_eq!(presentation.state(), &PresentationState::Pending);
        assert_eq!(rx.borrow().state(), &PresentationState::Pending);
    }

    #[tokio::test]
    async fn test_dropping_handle_suppresses_state_update() {
        let store = Arc::new(GatedStore::new(Reply::Address("https://example.com/feedbacks/1.md")));
        let handle = Activation::start(publisher(store.clone()), challenge(), "x");
        let mut rx = handle.subscribe();

        let_task_run().await;
        drop(handle);
        store.release();

        // The channel closes when the task ends; an applied update would show up first.
        assert!(rx.changed().await.is_err());
        assert_eq!(store.paths().len(), 1);
        assert_eq!(rx.borrow().state(), &PresentationState::Pending);
    }

    #[tokio::test]
    async fn test_external_token_cancels_update() {
        let store = Arc::new(GatedStore::new(Reply::Fail));
        let token = CancellationToken::new();
        let handle = Activation::start_with_token(publisher(store.clone()), challenge(), "x", token.clone());

        token.cancel();
        store.release();
        let presentation = handle.wait().await;

        assert!(!presentation.error_flag());
        assert_eq!(presentation.state(), &PresentationState::Pending);
    }

    #[tokio::test]
    async fn test_reactivation_makes_independent_writes() {
        let store = Arc::new(GatedStore::open(Reply::Address("https://example.com/feedbacks/1.md")));
        let publisher = publisher(store.clone());

        let first = Activation::start(publisher.clone(), challenge(), "x").wait().await;
        let second = Activation::start(publisher, challenge(), "x").wait().await;

        assert!(matches!(first.view(), View::Code { .. }));
        assert!(matches!(second.view(), View::Code { .. }));

        let paths = store.paths();
        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
    }
}

//! # Feedback Publisher
//!
//! Turns a coding-challenge answer into a feedback file, commits it to a
//! remote content store, and tracks whether a scannable code can be shown.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `compose`: builds the markdown `FeedbackDocument`
//!   - `StoreConfig` / `StoreConfigBuilder`: store addressing with validation
//!   - `Presentation`: the `Pending -> Ready | Failed` state machine and its `View`
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `FeedbackPublisherApi`: Driving port (inbound API)
//!   - `ContentStore`, `TimeSource`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `FeedbackPublisher`: implements `FeedbackPublisherApi`
//!   - `Activation`: one-shot background publish with cancellation
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `GitHubContentStore`: the GitHub "create file contents" endpoint
//!
//! ## Flow
//!
//! ```text
//! Challenge + answer ──compose──▶ FeedbackDocument
//!                                      │ base64
//!                                      ▼
//!                 PUT {dir}/{epoch-millis}.md  (one write, no retry)
//!                                      │
//!                   ┌──────────────────┴──────────────────┐
//!                   ▼                                     ▼
//!          Ready(download_url)                    Failed(reason)
//!          View::Code                             View::Failed
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use feedback_publisher::{Activation, Challenge, FeedbackPublisher, GitHubContentStore, StoreConfig};
//! use std::sync::Arc;
//!
//! let config = StoreConfig::from_env();
//! let store = Arc::new(GitHubContentStore::new(config.clone())?);
//! let publisher = Arc::new(FeedbackPublisher::new(store, &config));
//!
//! let challenge = Challenge::new("Off-by-one", "Fix the loop bound.");
//! let handle = Activation::start(publisher, challenge, "for i in range(n+1): ...");
//! let final_state = handle.wait().await;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::GitHubContentStore;
pub use domain::{
    commit_message, compose, AccessToken, Challenge, FeedbackDocument, Presentation,
    PresentationState, PublishReceipt, PublishedAddress, StoragePath, StoreConfig,
    StoreConfigBuilder, View, PLACEHOLDER_SIZE_PX, TOKEN_ENV_VAR,
};
pub use error::{ConfigError, PublishError, StateError};
pub use ports::{ContentStore, CreateObjectRequest, FeedbackPublisherApi, SystemTimeSource, TimeSource};
pub use service::{Activation, ActivationHandle, CancellationToken, FeedbackPublisher};

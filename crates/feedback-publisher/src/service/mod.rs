//! Service Layer
//!
//! Orchestrates domain logic and coordinates with the driven ports.

mod activation;
mod publisher;

pub use activation::{Activation, ActivationHandle, CancellationToken};
pub use publisher::FeedbackPublisher;

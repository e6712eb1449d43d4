//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the host that activates a publish
//! - Driven Ports (outbound) - The content store and the wall clock

pub mod inbound;
pub mod outbound;

pub use inbound::FeedbackPublisherApi;
pub use outbound::{ContentStore, CreateObjectRequest, SystemTimeSource, TimeSource};

//! Adapters Layer
//!
//! Concrete implementations of the driven ports.

mod github;

pub use github::GitHubContentStore;

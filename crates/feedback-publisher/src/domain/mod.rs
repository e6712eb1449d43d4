//! Domain layer for the feedback publisher.
//!
//! Pure logic: document composition, store addressing, and the
//! presentation state machine. No I/O happens here.

pub mod composer;
pub mod config;
pub mod entities;
pub mod presentation;
pub mod value_objects;

pub use composer::{
    commit_message, compose, ANSWER_HEADING, ANSWER_LANGUAGE, PROBLEM_HEADING,
};
pub use config::{StoreConfig, StoreConfigBuilder, TOKEN_ENV_VAR};
pub use entities::{Challenge, FeedbackDocument, PublishReceipt};
pub use presentation::{Presentation, PresentationState, View, PLACEHOLDER_SIZE_PX};
pub use value_objects::{AccessToken, PublishedAddress, StoragePath, FEEDBACK_FILE_EXTENSION};

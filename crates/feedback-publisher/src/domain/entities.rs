//! # Domain Entities
//!
//! The challenge supplied by the host, the document derived from it, and
//! the receipt the store hands back.

use base64::prelude::*;
use serde::{Deserialize, Serialize};

use super::value_objects::PublishedAddress;

/// A coding challenge as seen by the publisher.
///
/// Owned by the caller; the publisher only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge title, used as the document heading and in the commit message.
    pub title: String,
    /// Problem statement.
    pub description: String,
}

impl Challenge {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Markdown feedback composed from a challenge and an answer.
///
/// Built once per activation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDocument {
    text: String,
}

impl FeedbackDocument {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    /// The markdown text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Raw UTF-8 bytes of the document.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Standard (padded) base64 of the UTF-8 bytes, as the store expects.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for FeedbackDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the store reports after creating a feedback object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Public download address of the new object.
    pub address: PublishedAddress,
    /// Path of the object inside the repository.
    pub path: String,
    /// Blob sha of the stored object, when reported.
    pub content_sha: Option<String>,
    /// Sha of the commit that added the object, when reported.
    pub commit_sha: Option<String>,
}

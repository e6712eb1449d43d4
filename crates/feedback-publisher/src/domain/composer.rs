//! Feedback document composition.
//!
//! Layout, one element per line:
//!
//! ````text
//! # {title}
//! ## 問題
//! {description}
//! ## あなたの回答
//! ```python
//! {answer}
//! ```
//! ````
//!
//! Inputs are inserted verbatim. Markdown in a title, description or answer
//! can break the document structure; nothing is escaped.

use super::entities::{Challenge, FeedbackDocument};

/// Heading above the problem statement.
pub const PROBLEM_HEADING: &str = "## 問題";

/// Heading above the submitted answer.
pub const ANSWER_HEADING: &str = "## あなたの回答";

/// Language tag on the answer's code fence.
pub const ANSWER_LANGUAGE: &str = "python";

const FENCE: &str = "```";

/// Build the feedback document for a challenge and a submitted answer.
///
/// ```
/// use feedback_publisher::{compose, Challenge};
///
/// let doc = compose(&Challenge::new("Two Sum", "Find two numbers."), "pass");
/// assert!(doc.as_str().starts_with("# Two Sum\n## 問題\nFind two numbers.\n## あなたの回答\n"));
/// assert!(doc.as_str().ends_with("```python\npass\n```"));
/// ```
pub fn compose(challenge: &Challenge, answer: &str) -> FeedbackDocument {
    let text = format!(
        "# {title}\n{PROBLEM_HEADING}\n{description}\n{ANSWER_HEADING}\n{FENCE}{ANSWER_LANGUAGE}\n{answer}\n{FENCE}",
        title = challenge.title,
        description = challenge.description,
    );
    FeedbackDocument::new(text)
}

/// Commit message for a feedback object created at `timestamp_ms`.
pub fn commit_message(challenge_title: &str, timestamp_ms: u64) -> String {
    format!("Add user feedback for {challenge_title}. timestamp: {timestamp_ms}")
}

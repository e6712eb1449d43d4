//! `--dry-run` output: the request that would be sent, without sending it.

use std::fmt::Write;

use feedback_publisher::{compose, Challenge, FeedbackPublisher, GitHubContentStore, TimeSource};

/// Describe the create request for `challenge` and `answer`.
///
/// Path, message and URL come from the same code that builds the real
/// request.
pub fn describe<T: TimeSource>(
    store: &GitHubContentStore,
    publisher: &FeedbackPublisher<GitHubContentStore, T>,
    challenge: &Challenge,
    answer: &str,
) -> String {
    let document = compose(challenge, answer);
    let request = publisher.prepare_request(&document, &challenge.title);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "PUT {} (branch {})",
        store.contents_url(&request.path),
        store.config().branch
    );
    let _ = writeln!(out, "message: {}", request.message);
    let _ = writeln!(out, "---");
    let _ = write!(out, "{document}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use feedback_publisher::StoreConfigBuilder;

    struct FixedClock(u64);

    impl TimeSource for FixedClock {
        fn now_millis(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_describe_matches_outgoing_request() {
        let config = StoreConfigBuilder::new()
            .api_base_url("http://127.0.0.1:9000/")
            .directory("inbox")
            .build()
            .unwrap();
        let store = Arc::new(GitHubContentStore::new(config.clone()).unwrap());
        let publisher = FeedbackPublisher::with_time_source(store.clone(), &config, FixedClock(1_700_000_000_123));

        let out = describe(&store, &publisher, &Challenge::new("Two Sum", "Find two numbers."), "pass");
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("PUT http://127.0.0.1:9000/repos/matsuda-tkm/DebugMaster/contents/inbox/1700000000123.md (branch test/exhibition)")
        );
        assert_eq!(
            lines.next(),
            Some("message: Add user feedback for Two Sum. timestamp: 1700000000123")
        );
        assert_eq!(lines.next(), Some("---"));
        assert_eq!(lines.next(), Some("# Two Sum"));
        assert!(out.ends_with("```python\npass\n```"));
    }
}

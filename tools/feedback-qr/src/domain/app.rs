//! Application state management.

use feedback_publisher::{Presentation, View};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Main view.
    #[default]
    Main,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Title of the challenge being published.
    pub challenge_title: String,
    /// `{owner}/{repo}@{branch}` of the store.
    pub store_target: String,
    /// Latest presentation of the current activation.
    pub presentation: Presentation,
    /// Number of activations started so far.
    pub activations: u32,
    retry_requested: bool,
}

impl App {
    /// Create a new application instance.
    pub fn new(challenge_title: impl Into<String>, store_target: impl Into<String>) -> Self {
        Self {
            state: AppState::Main,
            challenge_title: challenge_title.into(),
            store_target: store_target.into(),
            presentation: Presentation::new(),
            activations: 0,
            retry_requested: false,
        }
    }

    /// Record that a fresh activation has been started.
    pub fn activation_started(&mut self) {
        self.activations += 1;
        self.presentation = Presentation::new();
    }

    pub fn update(&mut self, presentation: Presentation) {
        self.presentation = presentation;
    }

    pub fn view(&self) -> View {
        self.presentation.view()
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: char) {
        match self.state {
            AppState::Main => self.handle_main_key(key),
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Main;
            }
            AppState::Quit => {}
        }
    }

    fn handle_main_key(&mut self, key: char) {
        match key {
            'q' | 'Q' => self.state = AppState::Quit,
            '?' => self.state = AppState::Help,
            // Only a failed publish may be retried
            'r' | 'R' if self.presentation.error_flag() => self.retry_requested = true,
            _ => {}
        }
    }

    /// Consume a pending retry request.
    pub fn take_retry(&mut self) -> bool {
        std::mem::take(&mut self.retry_requested)
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_publisher::PublishedAddress;

    fn failed_app() -> App {
        let mut app = App::new("Two Sum", "o/r@b");
        let mut presentation = Presentation::new();
        presentation.resolve(Err("HTTP 401".to_string())).unwrap();
        app.update(presentation);
        app
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = App::new("Two Sum", "o/r@b");
        app.handle_key('?');
        assert_eq!(app.state, AppState::Help);
        app.handle_key('x');
        assert_eq!(app.state, AppState::Main);
        app.handle_key('q');
        assert!(app.should_quit());
    }

    #[test]
    fn test_retry_only_after_failure() {
        let mut app = App::new("Two Sum", "o/r@b");
        app.handle_key('r');
        assert!(!app.take_retry());

        let mut ready = Presentation::new();
        ready
            .resolve(Ok(PublishedAddress::new("https://example.com/a.md").unwrap()))
            .unwrap();
        app.update(ready);
        app.handle_key('r');
        assert!(!app.take_retry());

        let mut app = failed_app();
        app.handle_key('r');
        assert!(app.take_retry());
        assert!(!app.take_retry());
    }

    #[test]
    fn test_new_activation_resets_presentation() {
        let mut app = failed_app();
        app.activation_started();

        assert_eq!(app.activations, 1);
        assert!(!app.presentation.error_flag());
        assert!(matches!(app.view(), View::Placeholder { .. }));
    }
}

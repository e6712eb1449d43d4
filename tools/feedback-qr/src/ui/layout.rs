//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  FEEDBACK-QR v0.1.0  ● PENDING                     [Q]uit [?]Help│
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Two Sum                                  owner/repo@branch     │
//! │                                                                 │
//! │                 placeholder / QR code / failure                 │
//! │                                                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  [R] Retry   [Q] Quit   [?] Help                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use feedback_publisher::PresentationState;

use crate::domain::{App, AppState};

use super::widgets;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(frame.area());

    render_header(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2], app);

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

fn status_span(state: &PresentationState) -> Span<'static> {
    let color = match state {
        PresentationState::Pending => Color::Yellow,
        PresentationState::Ready(_) => Color::Green,
        PresentationState::Failed(_) => Color::Red,
    };
    Span::styled(
        format!(" ● {} ", state.name().to_uppercase()),
        Style::default().fg(color),
    )
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " FEEDBACK-QR ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let status = status_span(app.presentation.state());

    let hints = vec![
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
    ];

    let title_len: usize = title.iter().map(|s| s.width()).sum();
    let hints_len: usize = hints.iter().map(|s| s.width()).sum();
    let used = u16::try_from(title_len + status.width() + hints_len).unwrap_or(u16::MAX);
    // Inside the borders
    let padding = area.width.saturating_sub(2).saturating_sub(used);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(usize::from(padding))));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.challenge_title))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(Line::styled(
            format!(" {} ", app.store_target),
            Style::default().fg(Color::DarkGray),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    widgets::view_panel::render(frame, inner_area, &app.view());
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut keybinds = Vec::new();
    if app.presentation.error_flag() {
        keybinds.push(Span::styled("[R]", Style::default().fg(Color::Yellow)));
        keybinds.push(Span::raw(" Retry  "));
    }
    keybinds.extend([
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit  "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
    ]);
    if app.activations > 1 {
        keybinds.push(Span::styled(
            format!("attempt {}", app.activations),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_publisher::{Presentation, PublishedAddress};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_pending_screen() {
        let app = App::new("Two Sum", "matsuda-tkm/DebugMaster@test/exhibition");
        let screen = screen(&app);

        assert!(screen.contains("FEEDBACK-QR"));
        assert!(screen.contains("PENDING"));
        assert!(screen.contains("Two Sum"));
        assert!(screen.contains("matsuda-tkm/DebugMaster@test/exhibition"));
        assert!(!screen.contains("Retry"));
    }

    #[test]
    fn test_ready_and_failed_screens() {
        let mut app = App::new("Two Sum", "o/r@b");
        let mut ready = Presentation::new();
        ready
            .resolve(Ok(PublishedAddress::new("https://example.com/feedbacks/1.md").unwrap()))
            .unwrap();
        app.update(ready);
        assert!(screen(&app).contains("READY"));

        let mut failed = Presentation::new();
        failed.resolve(Err("HTTP 403".to_string())).unwrap();
        app.update(failed);
        let screen = screen(&app);
        assert!(screen.contains("FAILED"));
        assert!(screen.contains("Retry"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new("Two Sum", "o/r@b");
        app.handle_key('?');
        assert!(screen(&app).contains("FEEDBACK-QR HELP"));
    }
}

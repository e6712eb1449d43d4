//! Help overlay widget.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 60, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Yellow)),
            Span::raw(text),
        ])
    };

    let help_text = vec![
        Line::styled(
            "FEEDBACK-QR HELP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("Keys", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        key("  R      ", "Retry after a failed publish"),
        key("  Q/Esc  ", "Quit"),
        key("  ?      ", "Toggle this help"),
        Line::raw(""),
        Line::styled("Panels", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  ░░░    ", Style::default().fg(Color::DarkGray)),
            Span::raw("Publishing, no code yet"),
        ]),
        Line::from(vec![
            Span::styled("  ▀▄█    ", Style::default().fg(Color::Green)),
            Span::raw("Published; scan to open the feedback"),
        ]),
        Line::from(vec![
            Span::styled("  ERROR  ", Style::default().fg(Color::Red)),
            Span::raw("Publish failed; nothing to scan"),
        ]),
        Line::raw(""),
        Line::styled("Press any key to close", Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

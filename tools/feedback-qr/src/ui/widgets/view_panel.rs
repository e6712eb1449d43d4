//! Draws a [`View`]: placeholder box, QR code, or failure panel.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use feedback_publisher::View;

use super::qr::{qr_text, text_size, Palette};

/// Approximate terminal cell size in px.
const CELL_WIDTH_PX: u16 = 8;
const CELL_HEIGHT_PX: u16 = 16;

/// Cells (columns, rows) covering a `width` x `height` px box.
pub fn placeholder_cells(width: u16, height: u16) -> (u16, u16) {
    (
        width.div_ceil(CELL_WIDTH_PX).max(1),
        height.div_ceil(CELL_HEIGHT_PX).max(1),
    )
}

/// Render `view` centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, view: &View) {
    match view {
        View::Placeholder { width, height } => render_placeholder(frame, area, *width, *height),
        View::Code { payload } => render_code(frame, area, payload),
        View::Failed { reason } => render_failure(frame, area, reason),
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, width_px: u16, height_px: u16) {
    let (cols, rows) = placeholder_cells(width_px, height_px);
    // Box plus one caption line
    let box_area = centered(cols + 2, rows + 3, area);

    let mut lines: Vec<Line> = (0..rows)
        .map(|_| Line::styled("░".repeat(usize::from(cols)), Style::default().fg(Color::DarkGray)))
        .collect();
    lines.push(Line::styled(
        "Publishing…",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        box_area,
    );
}

fn render_code(frame: &mut Frame, area: Rect, payload: &str) {
    let text = match qr_text(payload, Palette::DarkOnLight) {
        Ok(text) => text,
        Err(e) => {
            render_failure(frame, area, &format!("Cannot encode address as QR code: {e}"));
            return;
        }
    };

    let (cols, rows) = text_size(&text);
    let [code_area, caption_area] = Layout::vertical([Constraint::Length(rows), Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);
    let [code_area] = Layout::horizontal([Constraint::Length(cols)])
        .flex(Flex::Center)
        .areas(code_area);

    // Black on white so the code scans on any terminal theme
    frame.render_widget(
        Paragraph::new(Text::from(text)).style(Style::default().fg(Color::Black).bg(Color::White)),
        code_area,
    );

    let caption = Line::from(vec![
        Span::styled("Scan to open: ", Style::default().fg(Color::Green)),
        Span::styled(payload.to_string(), Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(
        Paragraph::new(caption)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        caption_area,
    );
}

fn render_failure(frame: &mut Frame, area: Rect, reason: &str) {
    let panel_area = centered(area.width.min(72), area.height.min(8), area);

    let text = vec![
        Line::styled(
            "Feedback could not be published",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(reason.to_string()),
        Line::raw(""),
        Line::styled("[R] Retry   [Q] Quit", Style::default().fg(Color::DarkGray)),
    ];

    let block = Block::default()
        .title(" ERROR ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        panel_area,
    );
}

/// A `width` x `height` rect centered in `area`, clipped to it.
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode};

/// Renders the status bar.
///
/// Health is informational only: actions are attempted whatever it says.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let health = match app.service_healthy {
        Some(true) => Span::styled(" Online ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled(" Indisponível ", Style::default().fg(Color::Red)),
        None => Span::styled(" ? ", Style::default().fg(Color::DarkGray)),
    };

    let mode = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().fg(Color::White)),
        Mode::Insert => Span::styled(
            " INSERT ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
    };

    let line = Line::from(vec![
        mode,
        Span::raw("│"),
        health,
        Span::raw("│"),
        Span::styled(format!(" {} ", app.base_url), Style::default().fg(Color::Cyan)),
        Span::raw("│"),
        Span::raw(format!(" {} ordens ", app.orders_table.len())),
        Span::raw("│"),
        Span::raw(format!(" {} eventos ", app.activity_log.len())),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

//! Activity panel: the log, newest entry on top.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::activity_log::ActivityLog;
use crate::tui::app::{App, Focus};

/// Renders the activity log panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Log {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(" Atividade ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let para = if app.activity_log.is_empty() {
        Paragraph::new("Nenhuma atividade ainda").style(Style::default().fg(Color::DarkGray))
    } else {
        let limit = usize::from(app.log_scroll) + usize::from(area.height);
        Paragraph::new(visible_lines(&app.activity_log, limit))
    };

    frame.render_widget(
        para.block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.log_scroll, 0)),
        area,
    );
}

/// Lines of the newest entries, stopping once at least `limit` lines are
/// collected. Older entries sit below the fold and are never built.
fn visible_lines(log: &ActivityLog, limit: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in log.entries() {
        if lines.len() >= limit {
            break;
        }
        lines.extend(entry.line().lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

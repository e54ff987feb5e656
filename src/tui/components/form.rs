//! Input form: credentials, symbol, side and amount.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Focus, Mode};
use crate::tui::input::TextInput;

/// Renders the form row.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
            Constraint::Percentage(20),
        ])
        .split(area);

    render_text_field(frame, columns[0], app, Focus::Gmail, &app.gmail);
    render_text_field(frame, columns[1], app, Focus::Senha, &app.senha);
    render_text_field(frame, columns[2], app, Focus::Symbol, &app.symbol);
    render_side(frame, columns[3], app);
    render_text_field(frame, columns[4], app, Focus::Amount, &app.amount);
}

fn border_style(app: &App, field: Focus) -> Style {
    if app.focus != field {
        Style::default().fg(Color::DarkGray)
    } else if app.mode == Mode::Insert {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn render_text_field(frame: &mut Frame, area: Rect, app: &App, field: Focus, input: &TextInput) {
    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style(app, field));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(input.display()), inner);

    if app.focus == field && app.mode == Mode::Insert {
        let offset = u16::try_from(input.cursor_width()).unwrap_or(u16::MAX);
        let cursor_x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

fn render_side(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", Focus::Side.label()))
        .borders(Borders::ALL)
        .border_style(border_style(app, Focus::Side));

    let color = match app.side {
        crate::models::OrderSide::Buy => Color::Green,
        crate::models::OrderSide::Sell => Color::Red,
    };
    let para = Paragraph::new(app.side.as_str())
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(para, area);
}

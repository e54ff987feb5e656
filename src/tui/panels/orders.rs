//! Orders panel: the service's order list with per-row actions.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::OrderStatus;
use crate::orders_table::SEPARATOR;
use crate::tui::app::{App, Focus};

/// Column holding the side.
const SIDE: usize = 2;
/// Column holding the status.
const STATUS: usize = 3;

/// Renders the orders panel.
///
/// Each line carries the same padded cells as
/// [`OrdersTable::markup`](crate::orders_table::OrdersTable::markup); only
/// styling is added here.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Orders;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" Ordens ({}) ", app.orders_table.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let table = &app.orders_table;
    let rows = table.row_cells();

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 1);
    lines.push(Line::styled(
        table.header_cells().join(SEPARATOR),
        Style::default().fg(Color::DarkGray),
    ));

    if rows.is_empty() {
        lines.push(Line::styled(
            "Nenhuma ordem",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (i, cells) in rows.into_iter().enumerate() {
        let mut spans = Vec::with_capacity(cells.len() * 2);
        for (column, cell) in cells.into_iter().enumerate() {
            if column > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            let style = match column {
                SIDE => side_style(cell.trim_end()),
                STATUS => status_style(cell.trim_end()),
                _ => Style::default(),
            };
            spans.push(Span::styled(cell, style));
        }

        let line = Line::from(spans);
        lines.push(if is_focused && table.selected_index() == Some(i) {
            line.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            line
        });
    }

    // Keep the selection visible in short panels.
    let visible = area.height.saturating_sub(3) as usize;
    let scroll = table
        .selected_index()
        .map_or(0, |i| i.saturating_sub(visible.saturating_sub(1)));

    let para = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(para, area);
}

fn side_style(side: &str) -> Style {
    match side {
        "buy" => Style::default().fg(Color::Green),
        "sell" => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

fn status_style(status: &str) -> Style {
    match OrderStatus::parse(status) {
        Some(OrderStatus::Executed) => Style::default().fg(Color::Green),
        Some(OrderStatus::Canceled | OrderStatus::Rejected) => Style::default().fg(Color::Red),
        Some(s) if s.is_open() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    use super::*;
    use crate::models::Order;

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn order(id: &str, side: &str, status: &str) -> Order {
        serde_json::from_value(json!({
            "id": id, "symbol": "EURUSD", "side": side, "status": status
        }))
        .unwrap()
    }

    #[test]
    fn every_markup_line_is_drawn() {
        let mut app = App::default();
        app.focus = Focus::Orders;
        app.orders_table
            .replace(vec![order("1", "buy", "pending"), order("2", "sell", "executed")]);

        let screen = screen(&app, 100, 8);
        let markup = app.orders_table.markup();
        assert_eq!(markup.lines().count(), 3);
        for line in markup.lines() {
            assert!(
                screen.iter().any(|row| row.contains(line)),
                "{line:?} missing from {screen:#?}"
            );
        }
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let screen = screen(&App::default(), 60, 6);
        assert!(screen.iter().any(|row| row.contains("Nenhuma ordem")));
        assert!(screen.iter().any(|row| row.contains("ID | Símbolo | Lado | Status")));
    }
}

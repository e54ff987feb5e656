//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Focus, Mode};
use super::components::{form, status_bar};
use super::panels::{activity, orders};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Form
            Constraint::Min(8),    // Orders | Activity
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    status_bar::render(frame, main_layout[0], app);
    form::render(frame, main_layout[1], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[2]);

    orders::render(frame, content[0], app);
    activity::render(frame, content[1], app);

    render_keybindings(frame, main_layout[3], app);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.focus) {
        (Mode::Insert, _) => "[Esc/Enter]normal [Tab]next field",
        (Mode::Normal, Focus::Orders) => {
            "[j/k]select [m]monitorar [x]cancelar [i]detalhes [r]listar [Tab]focus [q]quit"
        }
        (Mode::Normal, Focus::Log) => "[j/k]scroll [Home]top [Tab]focus [q]quit",
        (Mode::Normal, Focus::Side) => {
            "[Space]buy/sell [c]conectar [d]desconectar [a]analisar [n]criar [r]listar [h]health [q]quit"
        }
        (Mode::Normal, _) => {
            "[i]edit [c]conectar [d]desconectar [a]analisar [n]criar [r]listar [h]health [Tab]focus [q]quit"
        }
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

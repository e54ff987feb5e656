//! Application state for the TUI.

use crate::activity_log::ActivityLog;
use crate::models::OrderSide;
use crate::orders_table::OrdersTable;

use super::input::TextInput;

/// Central application state container.
///
/// Everything the operator sees lives here; the service remains the only
/// source of truth for orders and session state.
pub struct App {
    // -- Form --
    pub gmail: TextInput,
    pub senha: TextInput,
    pub symbol: TextInput,
    pub side: OrderSide,
    pub amount: TextInput,

    // -- Output --
    /// Running record of every action and its outcome.
    pub activity_log: ActivityLog,
    /// The last order list received from the service.
    pub orders_table: OrdersTable,
    /// Lines scrolled off the top of the log panel.
    pub log_scroll: u16,

    // -- UI State --
    pub focus: Focus,
    pub mode: Mode,
    /// Result of the last health check; `None` until one completes.
    pub service_healthy: Option<bool>,
    /// Service root shown in the status bar.
    pub base_url: String,

    pub should_quit: bool,
}

impl App {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            gmail: TextInput::new(),
            senha: TextInput::masked(),
            symbol: TextInput::new(),
            side: OrderSide::Buy,
            amount: TextInput::new(),

            activity_log: ActivityLog::new(),
            orders_table: OrdersTable::new(),
            log_scroll: 0,

            focus: Focus::Gmail,
            mode: Mode::Normal,
            service_healthy: None,
            base_url: base_url.into(),

            should_quit: false,
        }
    }

    /// The text field under focus, if the focus is on one.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Gmail => Some(&mut self.gmail),
            Focus::Senha => Some(&mut self.senha),
            Focus::Symbol => Some(&mut self.symbol),
            Focus::Amount => Some(&mut self.amount),
            Focus::Side | Focus::Orders | Focus::Log => None,
        }
    }

    pub fn scroll_log_down(&mut self) {
        self.log_scroll = self.log_scroll.saturating_add(1);
    }

    pub fn scroll_log_up(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new("")
    }
}

/// UI focus targets, in tab order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Gmail,
    Senha,
    Symbol,
    Side,
    Amount,
    Orders,
    Log,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Gmail,
        Focus::Senha,
        Focus::Symbol,
        Focus::Side,
        Focus::Amount,
        Focus::Orders,
        Focus::Log,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// Label shown on the field's border.
    pub fn label(self) -> &'static str {
        match self {
            Focus::Gmail => "Gmail",
            Focus::Senha => "Senha",
            Focus::Symbol => "Símbolo",
            Focus::Side => "Lado",
            Focus::Amount => "Valor",
            Focus::Orders => "Ordens",
            Focus::Log => "Atividade",
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::Gmail;
        for _ in 0..7 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Gmail);
        assert_eq!(Focus::Gmail.previous(), Focus::Log);
        assert_eq!(Focus::Amount.next(), Focus::Orders);
    }

    #[test]
    fn only_text_fields_are_editable() {
        let mut app = App::default();
        app.focus = Focus::Senha;
        assert!(app.focused_input().is_some());
        app.focus = Focus::Side;
        assert!(app.focused_input().is_none());
        app.focus = Focus::Orders;
        assert!(app.focused_input().is_none());
    }

    #[test]
    fn log_scroll_saturates() {
        let mut app = App::default();
        app.scroll_log_up();
        assert_eq!(app.log_scroll, 0);
        app.scroll_log_down();
        app.scroll_log_down();
        app.scroll_log_up();
        assert_eq!(app.log_scroll, 1);
    }
}

//! Event handling for the TUI.
//!
//! Terminal input and controller outcomes both arrive as [`Message`]s on one
//! channel and are applied by [`update`] one at a time, so a log prepend or a
//! table replacement is never interleaved with another.

use std::fmt;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use zeroize::Zeroizing;

use crate::activity_log::LogPayload;
use crate::models::{Order, OrderSide};

use super::app::{App, Focus, Mode};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// A controller action produced a log entry.
    Log(LogPayload),
    /// A refresh fetched a new order list.
    OrdersReplaced(Vec<Order>),
    /// A health check completed.
    Health(bool),
    /// Request to quit the application.
    Quit,
}

/// A password on its way to `/connect`; wiped on drop, never printed.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(raw: &str) -> Self {
        Self(Zeroizing::new(raw.to_string()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Controller work requested by a key press.
#[derive(Clone, Debug)]
pub enum Action {
    Connect { gmail: String, senha: Password },
    Disconnect,
    Analyze { symbol: String },
    CreateOrder {
        symbol: String,
        side: OrderSide,
        amount: String,
    },
    RefreshOrders,
    CheckHealth,
    MonitorOrder(String),
    CancelOrder(String),
    InspectOrder(String),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Log(payload) => {
            app.activity_log.record(payload);
            // Newest entries sit at the top; jump back to them.
            app.log_scroll = 0;
            None
        }
        Message::OrdersReplaced(orders) => {
            app.orders_table.replace(orders);
            None
        }
        Message::Health(healthy) => {
            app.service_healthy = Some(healthy);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) | Event::Tick => None,
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            return None;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus = app.focus.previous();
            } else {
                app.focus = app.focus.next();
            }
            None
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
            None
        }

        // Panel buttons
        KeyCode::Char('c') => Some(Action::Connect {
            gmail: app.gmail.as_str().to_string(),
            senha: Password::new(app.senha.as_str()),
        }),
        KeyCode::Char('d') => Some(Action::Disconnect),
        KeyCode::Char('a') => Some(Action::Analyze {
            symbol: app.symbol.as_str().to_string(),
        }),
        KeyCode::Char('n') => Some(Action::CreateOrder {
            symbol: app.symbol.as_str().to_string(),
            side: app.side,
            amount: app.amount.as_str().to_string(),
        }),
        KeyCode::Char('r') => Some(Action::RefreshOrders),
        KeyCode::Char('h') => Some(Action::CheckHealth),

        _ => match app.focus {
            Focus::Orders => handle_orders_keys(app, key),
            Focus::Log => handle_log_keys(app, key),
            Focus::Side => handle_side_keys(app, key),
            _ => handle_field_keys(app, key),
        },
    }
}

/// Row navigation and per-row actions.
fn handle_orders_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.orders_table.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.orders_table.select_previous();
            None
        }
        KeyCode::Char('m') => selected_id(app).map(Action::MonitorOrder),
        KeyCode::Char('x') => selected_id(app).map(Action::CancelOrder),
        KeyCode::Char('i') | KeyCode::Enter => selected_id(app).map(Action::InspectOrder),
        _ => None,
    }
}

fn selected_id(app: &App) -> Option<String> {
    app.orders_table.selected_order().map(|o| o.id.clone())
}

fn handle_log_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_log_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_log_up(),
        KeyCode::Home => app.log_scroll = 0,
        _ => {}
    }
    None
}

fn handle_side_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('i')) {
        app.side.toggle();
    }
    None
}

/// Enter insert mode on a text field.
fn handle_field_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
        app.mode = Mode::Insert;
    }
    None
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    let Some(input) = app.focused_input() else {
        app.mode = Mode::Normal;
        return None;
    };

    match key.code {
        KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Tab => {
            app.mode = Mode::Normal;
            app.focus = app.focus.next();
        }
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    None
}

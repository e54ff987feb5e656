//! Terminal user interface for the control panel.
//!
//! A single screen: credential/order form on top, the order table and the
//! activity log side by side below it.

pub mod app;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod input;
pub mod panels;
pub mod sink;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use dispatch::dispatch;
pub use event::{Action, Event, Message};
pub use sink::UiSink;
pub use terminal::{Tui, install_panic_hook, restore_terminal, setup_terminal};
pub use ui::render;

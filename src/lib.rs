//! Terminal control panel for a remote trading session.
//!
//! Authenticates a trading account, asks the service for a market read,
//! places, monitors and cancels orders, and keeps a running activity log.
//! The service is the only source of truth: after every mutation the whole
//! order list is fetched again and the table replaced.

pub mod activity_log;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod orders_table;
pub mod transport;
pub mod tui;

pub use activity_log::{ActivityLog, LogPayload, LogSink};
pub use controller::OrderSessionController;
pub use error::{PanelError, Result};
pub use orders_table::{OrderView, OrdersTable};
pub use transport::{HttpTransport, RequestOptions, Transport};

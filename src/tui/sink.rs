//! Bridges controller output back into the UI loop.

use tokio::sync::mpsc;

use crate::activity_log::{LogPayload, LogSink};
use crate::controller::StatusView;
use crate::models::Order;
use crate::orders_table::OrderView;

use super::event::Message;

/// Forwards controller outcomes to [`update`](super::event::update) as
/// [`Message`]s.
///
/// Sends after the UI loop has exited are dropped.
#[derive(Clone, Debug)]
pub struct UiSink {
    tx: mpsc::UnboundedSender<Message>,
}

impl UiSink {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl LogSink for UiSink {
    fn record(&self, payload: LogPayload) {
        let _ = self.tx.send(Message::Log(payload));
    }
}

impl OrderView for UiSink {
    fn replace_orders(&self, orders: Vec<Order>) {
        let _ = self.tx.send(Message::OrdersReplaced(orders));
    }
}

impl StatusView for UiSink {
    fn set_health(&self, healthy: bool) {
        let _ = self.tx.send(Message::Health(healthy));
    }
}

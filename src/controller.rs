//! Operator actions against the trading service.
//!
//! Each action is an independent try/report step: call the service through
//! the [`Transport`], write exactly one outcome entry to the log, and, for
//! the actions that mutate orders, re-fetch the whole order list. Errors
//! never escape; they become log lines prefixed with the action's label.

use std::sync::Arc;

use serde_json::{Map, Number, Value, json};
use tracing::{info, warn};

use crate::PanelError;
use crate::activity_log::{LogPayload, LogSink};
use crate::models::{HealthResponse, Order, OrderSide};
use crate::orders_table::OrderView;
use crate::transport::{RequestOptions, Transport};

/// Lifetime the panel requests for every new order.
pub const EXPIRATION_SECONDS: u64 = 60;

/// The capability of showing the service's last known health.
pub trait StatusView {
    fn set_health(&self, healthy: bool);
}

/// Everything the controller reports into.
pub trait PanelSink: LogSink + OrderView + StatusView + Clone + Send + Sync + 'static {}

impl<S> PanelSink for S where S: LogSink + OrderView + StatusView + Clone + Send + Sync + 'static {}

/// Coerces the raw amount field into the JSON number sent to the service.
///
/// Blank input becomes `0`. Decimal notation and unsigned `0x`/`0o`/`0b`
/// literals are accepted; anything else, or a non-finite result, becomes
/// `null`. Range and sign are left for the service to judge.
pub fn coerce_amount(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    let parsed = radix_literal(trimmed).or_else(|| trimmed.parse::<f64>().ok());
    match parsed {
        Some(amount) if amount.is_finite() => {
            if amount.fract() == 0.0 && amount.abs() < 1e15 {
                Value::from(amount as i64)
            } else {
                Number::from_f64(amount).map_or(Value::Null, Value::Number)
            }
        }
        _ => Value::Null,
    }
}

/// Parses `0x1f`, `0o17` or `0b101` (either letter case, no sign).
fn radix_literal(raw: &str) -> Option<f64> {
    let radix = match raw.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u128::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Percent-encodes a value used as a single path segment.
fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Runs operator actions and reports their outcomes.
///
/// Holds no session state of its own: every action is attempted and its
/// result reported as-is.
pub struct OrderSessionController<T, S> {
    transport: Arc<T>,
    sink: S,
}

impl<T, S: Clone> Clone for OrderSessionController<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            sink: self.sink.clone(),
        }
    }
}

impl<T: Transport, S: PanelSink> OrderSessionController<T, S> {
    pub fn new(transport: Arc<T>, sink: S) -> Self {
        Self { transport, sink }
    }

    /// `POST /connect` with the operator's credentials.
    pub async fn connect(&self, gmail: &str, senha: &str) {
        info!(action = "connect", gmail, "connecting");
        let body = json!({ "gmail": gmail, "senha": senha });
        match self.transport.call("/connect", RequestOptions::post(body)).await {
            Ok(data) => self.report(json!({ "message": "conectado com sucesso", "data": data })),
            Err(e) => self.fail("Falha na conexão", &e),
        }
    }

    /// `POST /disconnect`.
    pub async fn disconnect(&self) {
        info!(action = "disconnect", "disconnecting");
        match self
            .transport
            .call("/disconnect", RequestOptions::post_empty())
            .await
        {
            Ok(data) => self.report(json!({ "message": "desconectado", "data": data })),
            Err(e) => self.fail("Falha ao desconectar", &e),
        }
    }

    /// `GET /market/{symbol}` and log the trend, signal and price.
    pub async fn analyze(&self, symbol: &str) {
        info!(action = "analyze", symbol, "requesting market read");
        let path = format!("/market/{}", segment(symbol));
        match self.transport.call(&path, RequestOptions::get()).await {
            Ok(data) => {
                let mut entry = Map::new();
                entry.insert("message".into(), "análise de mercado".into());
                entry.insert("symbol".into(), symbol.into());
                for field in ["trend", "signal", "current_price"] {
                    if let Some(value) = data.get(field) {
                        entry.insert(field.into(), value.clone());
                    }
                }
                self.report(Value::Object(entry));
            }
            Err(e) => self.fail("Falha na análise", &e),
        }
    }

    /// `POST /orders`, then refresh the table.
    pub async fn create_order(&self, symbol: &str, side: OrderSide, amount: &str) {
        let body = json!({
            "symbol": symbol,
            "side": side.as_str(),
            "amount": coerce_amount(amount),
            "expiration_seconds": EXPIRATION_SECONDS,
        });
        info!(action = "create_order", symbol, %side, "placing order");
        match self.transport.call("/orders", RequestOptions::post(body)).await {
            Ok(data) => {
                self.report(order_entry("ordem criada", &data));
                self.refresh_orders().await;
            }
            Err(e) => self.fail("Falha ao criar ordem", &e),
        }
    }

    /// `POST /orders/{id}/monitor`, then refresh the table.
    pub async fn monitor_order(&self, order_id: &str) {
        info!(action = "monitor_order", order_id, "monitoring order");
        let path = format!("/orders/{}/monitor", segment(order_id));
        match self.transport.call(&path, RequestOptions::post_empty()).await {
            Ok(data) => {
                self.report(order_entry("ordem monitorada", &data));
                self.refresh_orders().await;
            }
            Err(e) => self.fail("Falha ao monitorar ordem", &e),
        }
    }

    /// `POST /orders/{id}/cancel`, then refresh the table.
    pub async fn cancel_order(&self, order_id: &str) {
        info!(action = "cancel_order", order_id, "cancelling order");
        let path = format!("/orders/{}/cancel", segment(order_id));
        match self.transport.call(&path, RequestOptions::post_empty()).await {
            Ok(data) => {
                self.report(order_entry("ordem cancelada", &data));
                self.refresh_orders().await;
            }
            Err(e) => self.fail("Falha ao cancelar ordem", &e),
        }
    }

    /// `GET /orders/{id}`; read-only, so the table is left alone.
    pub async fn inspect_order(&self, order_id: &str) {
        let path = format!("/orders/{}", segment(order_id));
        match self.transport.call(&path, RequestOptions::get()).await {
            Ok(data) => self.report(order_entry("detalhes da ordem", &data)),
            Err(e) => self.fail("Falha ao consultar ordem", &e),
        }
    }

    /// `GET /orders` and replace the entire table with the result.
    ///
    /// On any failure the table keeps whatever it showed before.
    ///
    /// Elements that cannot be read as an order are left out of the table
    /// and counted under `ignoradas`; a payload that is not a list at all
    /// fails the refresh.
    pub async fn refresh_orders(&self) {
        let result = match self.transport.call("/orders", RequestOptions::get()).await {
            Ok(payload) => serde_json::from_value::<Vec<Value>>(payload).map_err(PanelError::from),
            Err(e) => Err(e),
        };
        match result {
            Ok(items) => {
                let listed = items.len();
                let orders: Vec<Order> = items
                    .into_iter()
                    .filter_map(|item| match serde_json::from_value::<Order>(item) {
                        Ok(order) => Some(order),
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable order");
                            None
                        }
                    })
                    .collect();
                let total = orders.len();
                let skipped = listed - total;

                self.sink.replace_orders(orders);
                let mut entry = json!({ "message": "lista de ordens atualizada", "total": total });
                if skipped > 0 {
                    entry["ignoradas"] = json!(skipped);
                }
                self.report(entry);
            }
            Err(e) => self.fail("Erro ao listar ordens", &e),
        }
    }

    /// `GET /health`; updates the status bar as well as the log.
    pub async fn check_health(&self) {
        match self.transport.call("/health", RequestOptions::get()).await {
            Ok(data) => {
                let healthy = serde_json::from_value::<HealthResponse>(data.clone())
                    .is_ok_and(|h| h.is_ok());
                self.sink.set_health(healthy);
                self.report(json!({ "message": "servidor disponível", "data": data }));
            }
            Err(e) => {
                self.sink.set_health(false);
                self.fail("Falha no health check", &e);
            }
        }
    }

    fn report(&self, value: Value) {
        self.sink.record(LogPayload::Structured(value));
    }

    fn fail(&self, label: &str, error: &PanelError) {
        warn!(label, status = ?error.status(), error = %error, "action failed");
        self.sink.record(LogPayload::Text(format!("{label}: {error}")));
    }
}

/// `{message, order}`, leaving `order` out when the response lacks it.
fn order_entry(message: &str, data: &Value) -> Value {
    let mut entry = Map::new();
    entry.insert("message".into(), message.into());
    if let Some(order) = data.get("order") {
        entry.insert("order".into(), order.clone());
    }
    Value::Object(entry)
}

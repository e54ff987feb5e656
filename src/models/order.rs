//! Order projection as listed by `GET /orders`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// An order owned by the service.
///
/// The panel never mutates these; each refresh replaces the whole set.
/// Decoding is forgiving about shape: scalar ids and statuses are taken as
/// text, the side is matched case-insensitively, and optional fields of an
/// unexpected type are dropped.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Order {
    #[serde(deserialize_with = "scalar_text")]
    pub id: String,
    #[serde(deserialize_with = "scalar_text")]
    pub symbol: String,
    pub side: OrderSide,
    #[serde(deserialize_with = "scalar_text")]
    pub status: String,
    #[serde(default, deserialize_with = "loose_amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Why the service rejected or cancelled the order, if it said.
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn scalar_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A required field given as a string, number or bool.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let shown = value.to_string();
    scalar_to_text(value)
        .ok_or_else(|| de::Error::custom(format!("expected a string or number, got {shown}")))
}

/// An optional text field; anything that is not a scalar counts as absent.
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_to_text(Value::deserialize(deserializer)?))
}

/// An amount given as a number or a numeric string.
fn loose_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    })
}

/// Direction of an order.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the wire-format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }

    /// Flips between buy and sell.
    pub fn toggle(&mut self) {
        *self = match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        };
    }
}

impl<'de> Deserialize<'de> for OrderSide {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            _ => Err(de::Error::unknown_variant(&raw, &["buy", "sell"])),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states the service is known to report.
///
/// [`Order::status`] stays a plain string so unknown states still render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Created,
    Pending,
    Executed,
    Canceled,
    Rejected,
}

impl OrderStatus {
    /// Parses a wire status, returning `None` for anything unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "created" => Some(OrderStatus::Created),
            "pending" => Some(OrderStatus::Pending),
            "executed" => Some(OrderStatus::Executed),
            "canceled" => Some(OrderStatus::Canceled),
            "rejected" => Some(OrderStatus::Rejected),
            _ => None,
        }
    }

    /// Whether the order can still change on the service side.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Created | OrderStatus::Pending)
    }
}

impl Order {
    /// Typed view of [`Order::status`].
    pub fn known_status(&self) -> Option<OrderStatus> {
        OrderStatus::parse(&self.status)
    }
}

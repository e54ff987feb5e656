//! Wire models for the trading service's JSON payloads.
//!
//! Only the projections the panel renders are typed; everything else is
//! handled as raw [`serde_json::Value`] and logged as-is.

pub mod health;
pub mod order;

pub use health::HealthResponse;
pub use order::{Order, OrderSide, OrderStatus};

//! `/health` response model.

use serde::Deserialize;

/// Liveness report returned by `GET /health`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthResponse {
    /// Whether the service reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

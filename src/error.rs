//! Crate-level error types.
//!
//! [`PanelError`] unifies every error source (request failures, network,
//! JSON, configuration, terminal I/O) behind a single enum so callers can
//! match on the variant they care about while still using the `?` operator
//! for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The service answered with a non-success status.
    ///
    /// Displays as the bare message so it can be embedded verbatim in
    /// activity log lines.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup or teardown failed.
    #[error("io error: {0}")]
    Io(String),
}

impl PanelError {
    /// Returns the HTTP status carried by a [`PanelError::RequestFailed`].
    pub fn status(&self) -> Option<u16> {
        match self {
            PanelError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_displays_bare_message() {
        let err = PanelError::RequestFailed {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn other_variants_carry_no_status() {
        let err = PanelError::Config("bad url".to_string());
        assert_eq!(err.to_string(), "configuration error: bad url");
        assert_eq!(err.status(), None);
    }
}

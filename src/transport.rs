//! Request/response mediation for the trading service.
//!
//! Every controller action goes through a single [`Transport::call`], which
//! sends one JSON request and folds the outcome into a
//! [`Result<serde_json::Value>`](crate::Result): the decoded body on a 2xx
//! status, or [`PanelError::RequestFailed`] carrying the service's `detail`
//! otherwise. There are no retries, no client-side timeout and no caching.

use std::future::Future;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{PanelError, Result};

/// Header every request carries unless the caller overrides it.
const CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Method, body and extra headers for a single call.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    /// JSON body; `None` sends no body at all.
    pub body: Option<Value>,
    /// Extra headers, merged over the JSON content type.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// A bodiless `GET`.
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    /// A `POST` with the given JSON body.
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            headers: Vec::new(),
        }
    }

    /// A `POST` whose body is the empty object `{}`.
    pub fn post_empty() -> Self {
        Self::post(Value::Object(Map::new()))
    }

    /// Adds a caller header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// The capability of issuing one request against the service.
///
/// Implemented by [`HttpTransport`] for real traffic; tests script their own.
pub trait Transport: Send + Sync + 'static {
    /// Issues one request to `path` (relative to the service root).
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::RequestFailed`] for a non-2xx status and
    /// [`PanelError::Http`] when no response arrives.
    fn call(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// Merges caller headers over the default JSON content type.
///
/// Names compare case-insensitively and are emitted lowercased; a caller
/// header replaces an existing one with the same name.
pub fn merge_headers(extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = vec![(CONTENT_TYPE.0.to_string(), CONTENT_TYPE.1.to_string())];
    for (name, value) in extra {
        let name = name.to_ascii_lowercase();
        match merged.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name, value.clone())),
        }
    }
    merged
}

/// Classifies a raw response.
///
/// An undecodable body (including an empty one) counts as `{}`, so a 2xx
/// with a broken body still succeeds and callers simply see missing fields.
///
/// # Errors
///
/// Returns [`PanelError::RequestFailed`] when `status` is outside 200..=299.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Value> {
    let payload: Value =
        serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()));

    if (200..300).contains(&status) {
        return Ok(payload);
    }

    let message = detail_message(&payload).unwrap_or_else(|| format!("Erro {status}"));
    Err(PanelError::RequestFailed { status, message })
}

/// Extracts a human-readable `detail` from an error payload.
///
/// Strings are used verbatim; structured details (validation error lists)
/// are rendered as compact JSON. Missing, null, `false` and empty values
/// yield `None`.
fn detail_message(payload: &Value) -> Option<String> {
    match payload.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// [`Transport`] over HTTP(S) using a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The root every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn call(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(options.method.clone(), &url);
        for (name, value) in merge_headers(&options.headers) {
            request = request.header(name, value);
        }
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        debug!(method = %options.method, path, "sending request");
        let response = request.send().await?;
        let status = response.status().as_u16();
        // An unreadable body is treated like an undecodable one.
        let body = response.bytes().await.unwrap_or_default();

        let result = interpret_response(status, &body);
        match &result {
            Ok(_) => debug!(method = %options.method, path, status, "request succeeded"),
            Err(e) => warn!(method = %options.method, path, status, error = %e, "request failed"),
        }
        result
    }
}

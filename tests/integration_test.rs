//! Tests against a running trading service.
//!
//! The service must be reachable at `ROBO_PAINEL_BASE_URL` (default
//! `http://127.0.0.1:8000`).
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

mod common;

use std::sync::Arc;

use robo_painel::config::fetch_config;
use robo_painel::controller::OrderSessionController;
use robo_painel::models::HealthResponse;
use robo_painel::tui::{App, UiSink};
use robo_painel::{HttpTransport, RequestOptions, Transport};
use serde_json::json;
use tokio::sync::mpsc;

use common::{drain, log_payloads};

fn live_transport() -> HttpTransport {
    let config = fetch_config().expect("valid configuration");
    HttpTransport::new(&config.service.base_url).expect("client builds")
}

#[tokio::test]
async fn test_health_reports_ok() {
    let value = live_transport()
        .call("/health", RequestOptions::get())
        .await
        .expect("service reachable");
    let health: HealthResponse = serde_json::from_value(value).expect("health shape");
    assert!(health.is_ok());
}

#[tokio::test]
async fn test_order_list_is_an_array() {
    let value = live_transport()
        .call("/orders", RequestOptions::get())
        .await
        .expect("service reachable");
    assert!(value.is_array());
}

#[tokio::test]
async fn test_non_gmail_account_is_rejected() {
    let err = live_transport()
        .call(
            "/connect",
            RequestOptions::post(json!({"gmail": "trader@example.com", "senha": "12345678"})),
        )
        .await
        .unwrap_err();
    assert!(matches!(err.status(), Some(400 | 422)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_unknown_order_cannot_be_inspected() {
    let err = live_transport()
        .call("/orders/does-not-exist", RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_controller_refresh_fills_table_and_log() {
    let transport = Arc::new(live_transport());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = OrderSessionController::new(transport, UiSink::new(tx));
    let mut app = App::default();

    controller.check_health().await;
    controller.refresh_orders().await;
    drain(&mut app, &mut rx);

    assert_eq!(app.service_healthy, Some(true));
    let payloads = log_payloads(&app);
    assert!(payloads[0].contains("lista de ordens atualizada"));
    assert!(payloads[1].contains("servidor disponível"));
}

//! Shared test utilities: a scripted transport, a one-shot HTTP server and
//! helpers for driving the controller into an [`App`].

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use reqwest::Method;
use robo_painel::controller::OrderSessionController;
use robo_painel::models::Order;
use robo_painel::transport::{RequestOptions, Transport, interpret_response};
use ratatui::{Terminal, backend::TestBackend};
use robo_painel::tui::event::update;
use robo_painel::tui::panels;
use robo_painel::tui::{App, Message, UiSink};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A request the scripted transport saw.
#[derive(Clone, Debug)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// A canned response: status plus raw body bytes.
#[derive(Clone, Debug)]
struct Reply {
    status: u16,
    body: Vec<u8>,
}

/// [`Transport`] that answers from a script keyed by method and path.
///
/// Replies for a route are consumed in order; the last one repeats.
/// Unscripted routes answer `404 {"detail":"Not Found"}`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON reply for `method path`.
    pub fn reply(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let bytes = serde_json::to_vec(&body).expect("serializable body");
        self.reply_raw(method, path, status, bytes)
    }

    /// Queues a raw (possibly non-JSON) reply for `method path`.
    pub fn reply_raw(self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Reply {
                status,
                body: body.into(),
            });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| format!("{} {}", c.method, c.path)).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn call(&self, path: &str, options: RequestOptions) -> robo_painel::Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method: options.method.clone(),
            path: path.to_string(),
            body: options.body.clone(),
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(&(options.method.clone(), path.to_string())) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let reply = reply.unwrap_or_else(|| Reply {
            status: 404,
            body: br#"{"detail":"Not Found"}"#.to_vec(),
        });
        interpret_response(reply.status, &reply.body)
    }
}

pub type TestController = OrderSessionController<ScriptedTransport, UiSink>;

/// Builds a controller over `transport` whose output lands in the returned receiver.
pub fn harness(
    transport: ScriptedTransport,
) -> (TestController, Arc<ScriptedTransport>, mpsc::UnboundedReceiver<Message>) {
    let transport = Arc::new(transport);
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = OrderSessionController::new(Arc::clone(&transport), UiSink::new(tx));
    (controller, transport, rx)
}

/// Applies every pending message to `app`, returning how many there were.
pub fn drain(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Message>) -> usize {
    let mut applied = 0;
    while let Ok(message) = rx.try_recv() {
        let action = update(app, message);
        assert!(action.is_none(), "controller output must not trigger actions");
        applied += 1;
    }
    applied
}

/// Log payloads, newest first.
pub fn log_payloads(app: &App) -> Vec<String> {
    app.activity_log.entries().map(|e| e.payload.clone()).collect()
}

/// The orders panel as drawn on a 100x12 terminal, one string per row.
pub fn orders_screen(app: &App) -> Vec<String> {
    let (width, height) = (100, 12);
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|frame| panels::orders::render(frame, frame.area(), app))
        .expect("draw");
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

/// Asserts every line of the table's text rendering is on screen.
pub fn assert_table_drawn(app: &App) {
    let screen = orders_screen(app);
    for line in app.orders_table.markup().lines() {
        assert!(
            screen.iter().any(|row| row.contains(line)),
            "{line:?} not drawn in {screen:#?}"
        );
    }
}

pub fn order_json(id: &str, symbol: &str, side: &str, status: &str) -> Value {
    json!({
        "id": id,
        "symbol": symbol,
        "side": side,
        "amount": 25.0,
        "status": status,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z",
        "reason": null
    })
}

pub fn order(id: &str, symbol: &str, side: &str, status: &str) -> Order {
    serde_json::from_value(order_json(id, symbol, side, status)).expect("valid order")
}

/// Serves the given `(status, body)` responses over HTTP, one connection
/// each, and hands back the raw requests received.
pub async fn serve(
    responses: Vec<(u16, &'static str)>,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.expect("accept");
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
        }
        requests
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.expect("read");
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

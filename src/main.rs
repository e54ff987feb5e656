use std::fs::File;
use std::sync::{Arc, Mutex};

use robo_painel::config::{LoggingConfig, fetch_config};
use robo_painel::tui::{
    self, App, Message, UiSink, dispatch, event, install_panic_hook, restore_terminal,
    setup_terminal,
};
use robo_painel::{HttpTransport, OrderSessionController, PanelError};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), PanelError> {
    let app_config = fetch_config()?;
    init_tracing(&app_config.logging)?;

    let transport = Arc::new(HttpTransport::new(&app_config.service.base_url)?);
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let controller = OrderSessionController::new(Arc::clone(&transport), UiSink::new(tx.clone()));

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    info!(base_url = transport.base_url(), "control panel started");

    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx, app_config.ui.tick_ms);

    let mut app = App::new(transport.base_url());
    dispatch(&controller, tui::Action::RefreshOrders);

    let outcome = run(&mut terminal, &mut app, &controller, &mut rx).await;
    restore_terminal(&mut terminal)?;
    info!("control panel stopped");
    outcome
}

async fn run(
    terminal: &mut tui::Tui,
    app: &mut App,
    controller: &OrderSessionController<HttpTransport, UiSink>,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<(), PanelError> {
    while !app.should_quit {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| PanelError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = event::update(app, message) {
            dispatch(controller, action);
        }
    }
    Ok(())
}

/// Sends tracing output to a file so it does not scribble over the TUI.
fn init_tracing(config: &LoggingConfig) -> Result<(), PanelError> {
    let file = File::create(&config.file)
        .map_err(|e| PanelError::Config(format!("cannot open log file {}: {e}", config.file)))?;
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| PanelError::Config(format!("invalid log filter {}: {e}", config.filter)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

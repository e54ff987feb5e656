//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};
use std::panic;
use std::thread::{self, ThreadId};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::error;

use crate::{PanelError, Result};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn io_error(context: &str, e: impl std::fmt::Display) -> PanelError {
    PanelError::Io(format!("{context}: {e}"))
}

/// Switches stdout to raw mode on the alternate screen.
///
/// # Errors
///
/// Returns [`PanelError::Io`] if stdout is not a TTY or the terminal
/// refuses a mode change. Raw mode is undone before returning an error.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(PanelError::Io(
            "the control panel needs an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| io_error("failed to enable raw mode", e))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(io_error("failed to enter alternate screen", e));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        io_error("failed to create terminal", e)
    })
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns [`PanelError::Io`] if any restoration step fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| io_error("failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| io_error("failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| io_error("failed to show cursor", e))
}

/// Which panics take the terminal down with them.
///
/// Only a panic on the thread that owns the terminal ends the draw loop and
/// restores the screen. Panics in spawned tasks leave the panel drawing and
/// go to the trace log.
#[derive(Clone, Copy, Debug)]
struct PanicRoute {
    owner: ThreadId,
}

impl PanicRoute {
    fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    fn restores_terminal(&self) -> bool {
        thread::current().id() == self.owner
    }
}

/// Makes a panic on the calling thread leave the terminal usable before
/// the message prints.
pub fn install_panic_hook() {
    let route = PanicRoute::current();
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if route.restores_terminal() {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            previous(info);
        } else {
            error!(thread = thread::current().name().unwrap_or("unnamed"), "{info}");
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owning_thread_restores() {
        let route = PanicRoute::current();
        assert!(route.restores_terminal());
        let elsewhere = thread::spawn(move || route.restores_terminal())
            .join()
            .unwrap();
        assert!(!elsewhere);
    }

    #[test]
    fn runtime_workers_do_not_restore() {
        let route = PanicRoute::current();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();
        let on_worker = runtime
            .block_on(runtime.spawn(async move { route.restores_terminal() }))
            .unwrap();
        assert!(!on_worker);
    }
}

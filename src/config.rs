//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `ROBO_PAINEL_BASE_URL`: root URL of the trading service
//! - `ROBO_PAINEL_LOG`: tracing filter directive (e.g. `debug`)
//! - `ROBO_PAINEL_LOG_FILE`: file the tracing subscriber writes to
//! - `ROBO_PAINEL_TICK_MS`: UI tick interval in milliseconds

/// Default service endpoint (the service's development server).
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default tracing filter.
const DEFAULT_LOG_FILTER: &str = "info";

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "robo-painel.log";

/// Default UI tick interval.
const DEFAULT_TICK_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

/// Where the trading service lives.
#[derive(Debug)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
}

/// Tracing output settings.
#[derive(Debug)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: String,
}

/// Terminal UI settings.
#[derive(Debug)]
pub struct UiConfig {
    pub tick_ms: u64,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`PanelError::Config`](crate::PanelError::Config) if the base URL
/// is not an `http(s)://` URL or the tick interval is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("ROBO_PAINEL_BASE_URL")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(crate::PanelError::Config(format!(
            "ROBO_PAINEL_BASE_URL must start with http:// or https://, got {base_url}"
        )));
    }
    let base_url = base_url.trim_end_matches('/').to_string();

    let tick_ms = match non_empty_var("ROBO_PAINEL_TICK_MS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                return Err(crate::PanelError::Config(format!(
                    "ROBO_PAINEL_TICK_MS must be a positive integer, got {raw}"
                )));
            }
        },
        None => DEFAULT_TICK_MS,
    };

    Ok(AppConfig {
        service: ServiceConfig { base_url },
        logging: LoggingConfig {
            filter: non_empty_var("ROBO_PAINEL_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            file: non_empty_var("ROBO_PAINEL_LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        },
        ui: UiConfig { tick_ms },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

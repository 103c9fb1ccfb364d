//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default for the public Binance endpoints; the
//! overrides exist mainly so tests and mirrors can point the dashboard at a
//! different host:
//! - `MARKETDECK_REST_URL` — REST API base (default `https://api.binance.com/api/v3`)
//! - `MARKETDECK_WS_URL` — WebSocket stream base (default `wss://stream.binance.com:9443/ws`)
//! - `MARKETDECK_PREFS` — preferences file path (default `preferences.json`)
//!
//! The config is constructed once at startup and passed by reference; there
//! is no ambient global state.

use std::time::Duration;

/// Default REST API base URL.
const DEFAULT_REST_URL: &str = "https://api.binance.com/api/v3";

/// Default WebSocket stream base URL.
const DEFAULT_WS_URL: &str = "wss://stream.binance.com:9443/ws";

/// Default preferences file path, relative to the working directory.
const DEFAULT_PREFS_PATH: &str = "preferences.json";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST API base URL, without a trailing slash.
    pub rest_url: String,
    /// WebSocket stream base URL, without a trailing slash.
    pub ws_url: String,
    /// Path of the persisted preferences file.
    pub prefs_path: String,
    /// Order book depth per side.
    pub book_depth: usize,
    /// Number of recent trades to request.
    pub trade_limit: usize,
    /// Number of candles to request.
    pub candle_limit: usize,
    /// Order book refresh cadence.
    pub book_refresh: Duration,
    /// Recent trades refresh cadence.
    pub trades_refresh: Duration,
    /// Chart refresh cadence.
    pub chart_refresh: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rest_url: DEFAULT_REST_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            prefs_path: DEFAULT_PREFS_PATH.to_string(),
            book_depth: 10,
            trade_limit: 40,
            candle_limit: 100,
            book_refresh: Duration::from_secs(5),
            trades_refresh: Duration::from_secs(2),
            chart_refresh: Duration::from_secs(10),
        }
    }
}

/// Loads the application configuration, applying environment overrides.
#[must_use]
pub fn fetch_config() -> AppConfig {
    let mut config = AppConfig::default();
    if let Some(url) = non_empty_var("MARKETDECK_REST_URL") {
        config.rest_url = url;
    }
    if let Some(url) = non_empty_var("MARKETDECK_WS_URL") {
        config.ws_url = url;
    }
    if let Some(path) = non_empty_var("MARKETDECK_PREFS") {
        config.prefs_path = path;
    }
    config
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

//! Persisted user preferences.
//!
//! The only durable state in the application: the active symbol and the set
//! of visible panels, stored as a small JSON file. Loading is forgiving —
//! a missing or corrupt file silently falls back to defaults — and saving
//! is best-effort, so persistence failures never interrupt the session.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::builtin_symbols;

/// The four dashboard panel kinds.
///
/// Wire names match the preference files written by earlier versions, so
/// `technical` is the chart and `market_trade` the recent-trades panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    #[serde(rename = "ticker")]
    Ticker,
    #[serde(rename = "orderbook")]
    OrderBook,
    #[serde(rename = "technical")]
    Chart,
    #[serde(rename = "market_trade")]
    Trades,
}

impl PanelKind {
    /// All panel kinds in display order.
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Ticker,
        PanelKind::OrderBook,
        PanelKind::Chart,
        PanelKind::Trades,
    ];

    /// Display label for the control bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Ticker => "Ticker",
            PanelKind::OrderBook => "Order Book",
            PanelKind::Chart => "Chart",
            PanelKind::Trades => "Recent Trades",
        }
    }
}

/// User preferences persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub current_symbol: String,
    pub visible_panels: Vec<PanelKind>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            current_symbol: "btcusdt".to_string(),
            visible_panels: PanelKind::ALL.to_vec(),
        }
    }
}

impl Preferences {
    /// Returns whether a panel is currently visible.
    #[must_use]
    pub fn is_visible(&self, kind: PanelKind) -> bool {
        self.visible_panels.contains(&kind)
    }

    /// Adds or removes a panel from the visible set.
    pub fn toggle_panel(&mut self, kind: PanelKind) {
        if let Some(pos) = self.visible_panels.iter().position(|k| *k == kind) {
            self.visible_panels.remove(pos);
        } else {
            self.visible_panels.push(kind);
        }
    }
}

/// Loads preferences from `path`, falling back to defaults on any failure.
///
/// A file naming a symbol outside the built-in table is treated the same
/// as a corrupt file: the whole thing is discarded. A symbol the selector
/// cannot represent would leave the session fetching data the UI never
/// accepts.
#[must_use]
pub fn load(path: &Path) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<Preferences>(&contents) {
            Ok(prefs) => {
                if builtin_symbols().iter().any(|s| s.code == prefs.current_symbol) {
                    prefs
                } else {
                    debug!(
                        path = %path.display(),
                        symbol = %prefs.current_symbol,
                        "Ignoring preferences with unknown symbol"
                    );
                    Preferences::default()
                }
            }
            Err(e) => {
                debug!(path = %path.display(), "Ignoring corrupt preferences file: {e}");
                Preferences::default()
            }
        },
        Err(e) => {
            debug!(path = %path.display(), "No preferences file: {e}");
            Preferences::default()
        }
    }
}

/// Saves preferences to `path`, best-effort.
pub fn save(path: &Path, prefs: &Preferences) {
    let json = match serde_json::to_string_pretty(prefs) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize preferences: {e}");
            return;
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        warn!(path = %path.display(), "Failed to save preferences: {e}");
    }
}

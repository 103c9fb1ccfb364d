//! Application state for the TUI.

use std::time::Instant;

use crate::indicators::IndicatorSet;
use crate::models::candle::{Candle, Interval};
use crate::models::ticker::TickerSnapshot;
use crate::models::trade::Trade;
use crate::models::{OrderBookSnapshot, SymbolInfo, builtin_symbols};
use crate::preferences::{PanelKind, Preferences};

/// Live ticker feed status shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    Connecting,
    Connected,
    Down,
}

impl FeedStatus {
    /// Returns a display string for the status.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FeedStatus::Connecting => "Connecting...",
            FeedStatus::Connected => "Live",
            FeedStatus::Down => "Feed down",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    pub message: String,
    pub timestamp: Instant,
}

/// Central application state container.
///
/// Owned exclusively by the event loop; every mutation happens there, so
/// the displayed market data needs no locking.
pub struct App {
    /// All selectable symbols.
    pub symbols: Vec<SymbolInfo>,
    /// Index of the active symbol in `symbols`.
    pub symbol_index: usize,
    /// Panels currently shown.
    pub visible_panels: Vec<PanelKind>,
    /// Chart interval currently displayed.
    pub interval: Interval,

    // -- Market data for the active symbol --
    /// Latest ticker snapshot, replaced wholesale per stream frame.
    pub ticker: Option<TickerSnapshot>,
    /// Latest order book fetch.
    pub book: Option<OrderBookSnapshot>,
    /// Latest recent-trades fetch, newest last.
    pub trades: Vec<Trade>,
    /// Latest candle series, oldest first.
    pub candles: Vec<Candle>,
    /// Indicators computed from `candles`.
    pub indicators: Option<IndicatorSet>,

    // -- UI state --
    /// Ticker feed status.
    pub feed_status: FeedStatus,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app state from loaded preferences.
    #[must_use]
    pub fn new(prefs: &Preferences) -> Self {
        let symbols = builtin_symbols();
        let symbol_index = symbols
            .iter()
            .position(|s| s.code == prefs.current_symbol)
            .unwrap_or(0);
        Self {
            symbols,
            symbol_index,
            visible_panels: prefs.visible_panels.clone(),
            interval: Interval::default(),
            ticker: None,
            book: None,
            trades: Vec::new(),
            candles: Vec::new(),
            indicators: None,
            feed_status: FeedStatus::default(),
            error_message: None,
            should_quit: false,
        }
    }

    /// The active symbol.
    #[must_use]
    pub fn current_symbol(&self) -> &SymbolInfo {
        &self.symbols[self.symbol_index]
    }

    /// Returns whether a panel is visible.
    #[must_use]
    pub fn is_visible(&self, kind: PanelKind) -> bool {
        self.visible_panels.contains(&kind)
    }

    /// Shows or hides a panel in the local state.
    pub fn toggle_panel(&mut self, kind: PanelKind) {
        if let Some(pos) = self.visible_panels.iter().position(|k| *k == kind) {
            self.visible_panels.remove(pos);
        } else {
            self.visible_panels.push(kind);
        }
    }

    /// Moves the symbol selection and clears the old symbol's data.
    ///
    /// Market data panels show placeholders until the new symbol's first
    /// fetches land; carrying the old symbol's numbers over would display
    /// stale data under the wrong name.
    pub fn select_symbol(&mut self, index: usize) {
        if index >= self.symbols.len() || index == self.symbol_index {
            return;
        }
        self.symbol_index = index;
        self.ticker = None;
        self.book = None;
        self.trades.clear();
        self.candles.clear();
        self.indicators = None;
        self.feed_status = FeedStatus::Connecting;
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than 5 seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > std::time::Duration::from_secs(5)
        {
            self.error_message = None;
        }
    }
}

//! Dashboard session controller.
//!
//! [`DashboardSession`] is the composition root: it owns the single active
//! symbol and the visible panel set, and wires the ticker feed plus one
//! refresh scheduler per REST panel to the event-loop channel. Changing
//! the symbol or the panel set tears every live component down before
//! building replacements, so data for two symbols is never in flight at
//! once and late results from the old configuration are discarded.

use std::path::Path;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::feed::{FeedState, TickerFeed};
use crate::indicators::IndicatorSet;
use crate::models::candle::{Candle, Interval};
use crate::preferences::{self, PanelKind, Preferences};
use crate::rest::MarketClient;
use crate::scheduler::RefreshScheduler;
use crate::tui::Message;

/// Owns the active symbol and the live data components feeding it.
pub struct DashboardSession {
    config: AppConfig,
    prefs: Preferences,
    client: MarketClient,
    tx: mpsc::UnboundedSender<Message>,
    interval: Interval,
    feed: Option<TickerFeed>,
    book_scheduler: Option<RefreshScheduler>,
    trades_scheduler: Option<RefreshScheduler>,
    chart_scheduler: Option<RefreshScheduler>,
}

impl DashboardSession {
    /// Creates a session; no components run until [`start`](Self::start).
    #[must_use]
    pub fn new(config: AppConfig, prefs: Preferences, tx: mpsc::UnboundedSender<Message>) -> Self {
        let client = MarketClient::new(&config.rest_url);
        Self {
            config,
            prefs,
            client,
            tx,
            interval: Interval::default(),
            feed: None,
            book_scheduler: None,
            trades_scheduler: None,
            chart_scheduler: None,
        }
    }

    /// The active symbol code.
    #[must_use]
    pub fn current_symbol(&self) -> &str {
        &self.prefs.current_symbol
    }

    /// The current preferences (symbol + visible panels).
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// The chart interval currently in use.
    #[must_use]
    pub fn chart_interval(&self) -> Interval {
        self.interval
    }

    /// Builds and starts every component for the current configuration.
    pub fn start(&mut self) {
        self.build_components();
    }

    /// Switches the active symbol.
    ///
    /// Synchronously stops and discards every component of the previous
    /// symbol before any replacement starts; afterwards zero live feeds or
    /// schedulers remain bound to the old symbol.
    pub fn switch_symbol(&mut self, code: &str) {
        if code == self.prefs.current_symbol {
            return;
        }
        info!(from = %self.prefs.current_symbol, to = %code, "Switching symbol");
        self.stop_all();
        self.prefs.current_symbol = code.to_string();
        self.build_components();
        self.persist();
    }

    /// Shows or hides one panel, rebuilding the component set.
    pub fn toggle_panel(&mut self, kind: PanelKind) {
        self.stop_all();
        self.prefs.toggle_panel(kind);
        self.build_components();
        self.persist();
    }

    /// Changes the chart interval, restarting only the chart scheduler.
    pub fn set_interval(&mut self, interval: Interval) {
        if interval == self.interval {
            return;
        }
        self.interval = interval;
        if let Some(scheduler) = self.chart_scheduler.take() {
            scheduler.stop();
        }
        if self.prefs.is_visible(PanelKind::Chart) {
            self.chart_scheduler = Some(self.start_chart_scheduler());
        }
    }

    /// Tears the ticker feed down and reconnects it, on user request after
    /// a transport error.
    pub fn reconnect_feed(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            let code = self.prefs.current_symbol.clone();
            feed.connect(&code);
        }
    }

    /// Stops every live component and persists preferences.
    pub fn shutdown(&mut self) {
        self.stop_all();
        self.persist();
    }

    /// Number of live components, for liveness assertions.
    #[must_use]
    pub fn live_components(&self) -> usize {
        let feed = usize::from(self.feed.as_ref().is_some_and(|f| {
            matches!(f.state(), FeedState::Connecting | FeedState::Open)
        }));
        [
            &self.book_scheduler,
            &self.trades_scheduler,
            &self.chart_scheduler,
        ]
        .into_iter()
        .flatten()
        .filter(|s| s.is_active())
        .count()
            + feed
    }

    fn stop_all(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            feed.disconnect();
        }
        for scheduler in [
            self.book_scheduler.take(),
            self.trades_scheduler.take(),
            self.chart_scheduler.take(),
        ]
        .into_iter()
        .flatten()
        {
            scheduler.stop();
        }
    }

    fn build_components(&mut self) {
        let code = self.prefs.current_symbol.clone();

        if self.prefs.is_visible(PanelKind::Ticker) {
            let mut feed = TickerFeed::new(&self.config.ws_url, self.tx.clone());
            feed.connect(&code);
            self.feed = Some(feed);
        }
        if self.prefs.is_visible(PanelKind::OrderBook) {
            self.book_scheduler = Some(self.start_book_scheduler());
        }
        if self.prefs.is_visible(PanelKind::Trades) {
            self.trades_scheduler = Some(self.start_trades_scheduler());
        }
        if self.prefs.is_visible(PanelKind::Chart) {
            self.chart_scheduler = Some(self.start_chart_scheduler());
        }
    }

    fn start_book_scheduler(&self) -> RefreshScheduler {
        let client = self.client.clone();
        let code = self.prefs.current_symbol.clone();
        let depth = self.config.book_depth;
        RefreshScheduler::start(self.config.book_refresh, self.tx.clone(), move || {
            let client = client.clone();
            let code = code.clone();
            async move {
                match client.order_book(&code, depth).await {
                    Ok(book) => Some(Message::Book { symbol: code, book }),
                    Err(e) => {
                        warn!(symbol = %code, "Order book fetch failed: {e}");
                        None
                    }
                }
            }
        })
    }

    fn start_trades_scheduler(&self) -> RefreshScheduler {
        let client = self.client.clone();
        let code = self.prefs.current_symbol.clone();
        let limit = self.config.trade_limit;
        RefreshScheduler::start(self.config.trades_refresh, self.tx.clone(), move || {
            let client = client.clone();
            let code = code.clone();
            async move {
                match client.recent_trades(&code, limit).await {
                    Ok(trades) => Some(Message::Trades {
                        symbol: code,
                        trades,
                    }),
                    Err(e) => {
                        warn!(symbol = %code, "Trade fetch failed: {e}");
                        None
                    }
                }
            }
        })
    }

    fn start_chart_scheduler(&self) -> RefreshScheduler {
        let client = self.client.clone();
        let code = self.prefs.current_symbol.clone();
        let interval = self.interval;
        let limit = self.config.candle_limit;
        RefreshScheduler::start(self.config.chart_refresh, self.tx.clone(), move || {
            let client = client.clone();
            let code = code.clone();
            async move {
                match client.candles(&code, interval, limit).await {
                    Ok(candles) => {
                        let closes: Vec<f64> = candles.iter().map(Candle::close_f64).collect();
                        let indicators = IndicatorSet::compute(&closes);
                        Some(Message::Chart {
                            symbol: code,
                            candles,
                            indicators,
                        })
                    }
                    Err(e) => {
                        warn!(symbol = %code, "Candle fetch failed: {e}");
                        None
                    }
                }
            }
        })
    }

    fn persist(&self) {
        preferences::save(Path::new(&self.config.prefs_path), &self.prefs);
    }
}

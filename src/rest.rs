//! REST market-data client.
//!
//! Three idempotent read operations against the exchange's public API:
//! order book snapshot, recent trades, and candlesticks. The client is
//! stateless; every call is an independent request. Callers run these from
//! scheduler tasks and treat any `Err` as "skip this refresh cycle".

use tracing::debug;

use crate::Result;
use crate::models::book::{OrderBookSnapshot, RawDepth};
use crate::models::candle::{Candle, Interval, KlineRow};
use crate::models::trade::Trade;

/// HTTP client for the public market-data endpoints.
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketClient {
    /// Creates a client for the given REST base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the order book, truncated to `depth` levels per side.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketdeckError`](crate::MarketdeckError) on transport
    /// failure, a non-success status, or a malformed payload.
    pub async fn order_book(&self, code: &str, depth: usize) -> Result<OrderBookSnapshot> {
        let url = format!("{}/depth", self.base_url);
        debug!(symbol = code, depth, "Fetching order book");
        let raw: RawDepth = self
            .http
            .get(&url)
            .query(&[("symbol", code.to_uppercase().as_str())])
            .query(&[("limit", depth)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        OrderBookSnapshot::from_raw(raw, depth)
    }

    /// Fetches the most recent trades, newest last, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketdeckError`](crate::MarketdeckError) on transport
    /// failure, a non-success status, or a malformed payload.
    pub async fn recent_trades(&self, code: &str, limit: usize) -> Result<Vec<Trade>> {
        let url = format!("{}/trades", self.base_url);
        debug!(symbol = code, limit, "Fetching recent trades");
        let mut trades: Vec<Trade> = self
            .http
            .get(&url)
            .query(&[("symbol", code.to_uppercase().as_str())])
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        trades.truncate(limit);
        Ok(trades)
    }

    /// Fetches candlesticks, oldest first, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns a [`MarketdeckError`](crate::MarketdeckError) on transport
    /// failure, a non-success status, or a malformed payload.
    pub async fn candles(
        &self,
        code: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let url = format!("{}/klines", self.base_url);
        debug!(symbol = code, interval = interval.as_str(), limit, "Fetching candles");
        let rows: Vec<KlineRow> = self
            .http
            .get(&url)
            .query(&[
                ("symbol", code.to_uppercase().as_str()),
                ("interval", interval.as_str()),
            ])
            .query(&[("limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        rows.into_iter().take(limit).map(Candle::from_row).collect()
    }
}

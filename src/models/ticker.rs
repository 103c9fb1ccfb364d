//! Ticker stream models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One frame from the `<symbol>@ticker` stream.
///
/// Binance encodes every numeric field as a JSON string and uses
/// single-letter keys; only the fields the dashboard displays are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerEvent {
    /// Lowercased stream symbol, e.g. `BTCUSDT` on the wire.
    #[serde(rename = "s", default)]
    pub symbol: String,
    /// Last traded price.
    #[serde(rename = "c", with = "rust_decimal::serde::str")]
    pub last: Decimal,
    /// Absolute 24h price change.
    #[serde(rename = "p", with = "rust_decimal::serde::str")]
    pub change: Decimal,
    /// 24h price change in percent.
    #[serde(rename = "P", with = "rust_decimal::serde::str")]
    pub change_pct: Decimal,
    /// 24h traded base-asset volume.
    #[serde(rename = "v", with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    /// 24h high.
    #[serde(rename = "h", with = "rust_decimal::serde::str")]
    pub high: Decimal,
    /// 24h low.
    #[serde(rename = "l", with = "rust_decimal::serde::str")]
    pub low: Decimal,
}

/// Normalized ticker state for one symbol.
///
/// Each stream frame produces a complete snapshot; the previous one is
/// replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSnapshot {
    pub last_price: Decimal,
    pub change_24h: Decimal,
    pub change_pct_24h: Decimal,
    pub volume_24h: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
}

impl From<TickerEvent> for TickerSnapshot {
    fn from(event: TickerEvent) -> Self {
        Self {
            last_price: event.last,
            change_24h: event.change,
            change_pct_24h: event.change_pct,
            volume_24h: event.volume,
            high_24h: event.high,
            low_24h: event.low,
        }
    }
}

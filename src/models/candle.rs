//! Candlestick (kline) models.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::{MarketdeckError, Result};

/// One raw `/klines` row.
///
/// Binance returns each kline as a 12-element array:
/// open time, open, high, low, close, volume, close time, quote volume,
/// trade count, taker buy base, taker buy quote, unused. Only the first
/// five positions are consumed here.
pub type KlineRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    String,
);

/// A single OHLC bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candle {
    /// Bucket start as epoch milliseconds.
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Candle {
    /// Decodes one kline row.
    ///
    /// # Errors
    ///
    /// Returns [`MarketdeckError::Malformed`] if an OHLC string fails to
    /// parse as a decimal.
    pub fn from_row(row: KlineRow) -> Result<Self> {
        Ok(Self {
            open_time: row.0,
            open: parse_decimal(&row.1)?,
            high: parse_decimal(&row.2)?,
            low: parse_decimal(&row.3)?,
            close: parse_decimal(&row.4)?,
        })
    }

    /// Closing price as an `f64` for indicator math.
    #[must_use]
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or_default()
    }
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| MarketdeckError::Malformed(format!("bad decimal {value:?}: {e}")))
}

/// Candlestick interval options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interval {
    M1,
    M5,
    M15,
    #[default]
    H1,
    H4,
    D1,
}

impl Interval {
    /// Wire-format interval string expected by the REST API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
        }
    }

    /// The next interval in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Interval::M1 => Interval::M5,
            Interval::M5 => Interval::M15,
            Interval::M15 => Interval::H1,
            Interval::H1 => Interval::H4,
            Interval::H4 => Interval::D1,
            Interval::D1 => Interval::M1,
        }
    }
}

//! Typed models for Binance market-data payloads.
//!
//! Each submodule pairs the raw wire shape (string-encoded decimals, short
//! field names) with the normalized record the rest of the crate consumes.

pub mod book;
pub mod candle;
pub mod ticker;
pub mod trade;

pub use book::{BookLevel, OrderBookSnapshot};
pub use candle::{Candle, Interval};
pub use ticker::TickerSnapshot;
pub use trade::{Side, Trade};

/// A tradable pair: exchange code plus human-readable display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Lowercase exchange code, e.g. `btcusdt`.
    pub code: String,
    /// Display name, e.g. `BTC/USDT`.
    pub display: String,
}

impl SymbolInfo {
    pub fn new(code: &str, display: &str) -> Self {
        Self {
            code: code.to_string(),
            display: display.to_string(),
        }
    }
}

/// The built-in symbol table shown in the selector.
#[must_use]
pub fn builtin_symbols() -> Vec<SymbolInfo> {
    vec![
        SymbolInfo::new("btcusdt", "BTC/USDT"),
        SymbolInfo::new("ethusdt", "ETH/USDT"),
        SymbolInfo::new("solusdt", "SOL/USDT"),
        SymbolInfo::new("bnbusdt", "BNB/USDT"),
        SymbolInfo::new("dogeusdt", "DOGE/USDT"),
        SymbolInfo::new("lunausdt", "LUNA/USDT"),
    ]
}

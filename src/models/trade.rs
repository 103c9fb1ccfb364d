//! Recent-trade models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggressor side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// A single executed trade from `/trades`, newest last in the response.
///
/// Prices and quantities arrive as JSON strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Trade {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    /// Execution time as epoch milliseconds.
    pub time: i64,
    /// Whether the buyer was the passive (maker) side.
    #[serde(rename = "isBuyerMaker")]
    pub is_buyer_maker: bool,
}

impl Trade {
    /// Classifies the aggressor side.
    ///
    /// `is_buyer_maker == false` means the buyer crossed the spread, so the
    /// trade is a buy. The inverted relationship is easy to get backwards;
    /// keep all direction logic going through this method.
    #[must_use]
    pub fn side(&self) -> Side {
        if self.is_buyer_maker {
            Side::Sell
        } else {
            Side::Buy
        }
    }
}

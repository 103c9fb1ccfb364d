//! Order book models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{MarketdeckError, Result};

/// Raw `/depth` response: price levels as `[price, qty]` string pairs.
#[derive(Debug, Deserialize)]
pub struct RawDepth {
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}

/// A single price level in the order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLevel {
    pub price: Decimal,
    pub qty: Decimal,
}

/// One fetch of the order book, truncated to the requested depth per side.
///
/// Bids are ordered highest price first, asks lowest price first, exactly
/// as the exchange returns them. The two sides are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBookSnapshot {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    /// Normalizes a raw depth payload, keeping at most `depth` levels per side.
    ///
    /// # Errors
    ///
    /// Returns [`MarketdeckError::Malformed`] if any price or quantity
    /// string fails to parse as a decimal.
    pub fn from_raw(raw: RawDepth, depth: usize) -> Result<Self> {
        Ok(Self {
            bids: parse_levels(raw.bids, depth)?,
            asks: parse_levels(raw.asks, depth)?,
        })
    }
}

fn parse_levels(raw: Vec<[String; 2]>, depth: usize) -> Result<Vec<BookLevel>> {
    raw.into_iter()
        .take(depth)
        .map(|[price, qty]| {
            Ok(BookLevel {
                price: parse_decimal(&price)?,
                qty: parse_decimal(&qty)?,
            })
        })
        .collect()
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| MarketdeckError::Malformed(format!("bad decimal {value:?}: {e}")))
}

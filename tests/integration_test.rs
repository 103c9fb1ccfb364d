//! Real API integration tests against the public Binance endpoints.
//!
//! These require network access. Run with:
//! `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use marketdeck::feed::{FeedState, TickerFeed};
use marketdeck::models::candle::Interval;
use marketdeck::rest::MarketClient;
use marketdeck::tui::Message;

const REST_URL: &str = "https://api.binance.com/api/v3";
const WS_URL: &str = "wss://stream.binance.com:9443/ws";

#[tokio::test]
async fn fetch_live_order_book() {
    let client = MarketClient::new(REST_URL);
    let book = client
        .order_book("btcusdt", 10)
        .await
        .expect("order book fetch failed");

    assert!(!book.bids.is_empty());
    assert!(book.bids.len() <= 10);
    assert!(book.asks.len() <= 10);
    // Best bid is always below best ask.
    assert!(book.bids[0].price < book.asks[0].price);
}

#[tokio::test]
async fn fetch_live_trades() {
    let client = MarketClient::new(REST_URL);
    let trades = client
        .recent_trades("btcusdt", 20)
        .await
        .expect("trade fetch failed");

    assert!(!trades.is_empty());
    assert!(trades.len() <= 20);
    // Newest last.
    assert!(trades.first().unwrap().time <= trades.last().unwrap().time);
}

#[tokio::test]
async fn fetch_live_candles() {
    let client = MarketClient::new(REST_URL);
    let candles = client
        .candles("btcusdt", Interval::H1, 50)
        .await
        .expect("candle fetch failed");

    assert!(!candles.is_empty());
    assert!(candles.len() <= 50);
    for pair in candles.windows(2) {
        assert!(pair[0].open_time < pair[1].open_time);
    }
}

#[tokio::test]
async fn live_ticker_stream_delivers_snapshots() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut feed = TickerFeed::new(WS_URL, tx);

    feed.connect("btcusdt");

    let received = timeout(Duration::from_secs(15), async {
        while let Some(message) = rx.recv().await {
            if let Message::Ticker { symbol, data } = message {
                assert_eq!(symbol, "btcusdt");
                assert!(data.last_price > rust_decimal::Decimal::ZERO);
                return true;
            }
        }
        false
    })
    .await
    .expect("timed out waiting for ticker");
    assert!(received);

    feed.disconnect();
    assert_eq!(feed.state(), FeedState::Closed);
}

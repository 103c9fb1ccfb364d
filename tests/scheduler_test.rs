//! Lifecycle tests for the panel refresh scheduler.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use marketdeck::scheduler::RefreshScheduler;
use marketdeck::tui::Message;

fn trades_message() -> Message {
    Message::Trades {
        symbol: "btcusdt".to_string(),
        trades: Vec::new(),
    }
}

#[tokio::test]
async fn first_fetch_fires_immediately() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let scheduler = RefreshScheduler::start(Duration::from_secs(60), tx, move || async move {
        Some(trades_message())
    });

    let message = timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("first delivery should not wait for the interval");
    assert!(matches!(message, Some(Message::Trades { .. })));

    scheduler.stop();
}

#[tokio::test]
async fn refreshes_repeatedly_until_stopped() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);

    let scheduler = RefreshScheduler::start(Duration::from_millis(20), tx, move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(trades_message())
        }
    });

    for _ in 0..3 {
        let message = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("expected periodic delivery");
        assert!(message.is_some());
    }
    assert!(fetches.load(Ordering::SeqCst) >= 3);

    scheduler.stop();
    assert!(!scheduler.is_active());

    // After stop the sender is gone and the channel drains to None.
    while let Ok(Some(_)) = timeout(Duration::from_millis(100), rx.recv()).await {}
}

#[tokio::test]
async fn stop_before_first_fetch_resolves_suppresses_delivery() {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let scheduler = RefreshScheduler::start(Duration::from_millis(10), tx, move || async move {
        // Slow fetch: still in flight when stop() is called.
        tokio::time::sleep(Duration::from_millis(150)).await;
        Some(trades_message())
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    scheduler.stop();

    // The in-flight result must be discarded, never delivered late.
    let outcome = timeout(Duration::from_millis(400), rx.recv()).await;
    assert!(
        matches!(outcome, Ok(None)),
        "late result was delivered: {outcome:?}"
    );
}

#[tokio::test]
async fn failed_cycles_are_skipped_silently() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);

    let scheduler = RefreshScheduler::start(Duration::from_millis(10), tx, move || {
        let counter = Arc::clone(&counter);
        async move {
            // Every other cycle "fails" and yields nothing.
            if counter.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                None
            } else {
                Some(trades_message())
            }
        }
    });

    // Deliveries still arrive despite interleaved failures.
    for _ in 0..2 {
        let message = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("skipped cycles must not stall the loop");
        assert!(message.is_some());
    }

    scheduler.stop();
}

//! Live ticker feed over a single WebSocket subscription.
//!
//! [`TickerFeed`] owns exactly one `<symbol>@ticker` stream at a time and
//! runs it through an explicit state machine:
//!
//! ```text
//! Idle -> Connecting -> Open -> (ClosedError | Closed)
//! ```
//!
//! Reconnecting is always tear-down-and-rebuild; connections are never
//! layered. There is no automatic reconnect on transport error — the
//! session decides, typically on user request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tracing::{info, warn};
use tungstenite::Message as WsMessage;

use crate::models::ticker::TickerEvent;
use crate::tui::Message;

/// Lifecycle state of a [`TickerFeed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedState {
    /// Never connected.
    #[default]
    Idle,
    /// Connection attempt in flight.
    Connecting,
    /// Receiving frames.
    Open,
    /// Terminated by a transport error.
    ClosedError,
    /// Terminated by an explicit disconnect.
    Closed,
}

/// Manages one live ticker subscription for one symbol at a time.
pub struct TickerFeed {
    ws_url: String,
    tx: mpsc::UnboundedSender<Message>,
    state: Arc<Mutex<FeedState>>,
    live: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl TickerFeed {
    /// Creates an idle feed bound to a WebSocket base URL.
    #[must_use]
    pub fn new(ws_url: &str, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            ws_url: ws_url.trim_end_matches('/').to_string(),
            tx,
            state: Arc::new(Mutex::new(FeedState::Idle)),
            live: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FeedState {
        *self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Opens the `<code>@ticker` stream.
    ///
    /// If a connection is already open or in flight it is torn down first;
    /// at most one live connection exists per instance.
    pub fn connect(&mut self, code: &str) {
        if matches!(self.state(), FeedState::Connecting | FeedState::Open) {
            self.disconnect();
        }

        let url = format!("{}/{}@ticker", self.ws_url, code.to_lowercase());
        let symbol = code.to_lowercase();
        set_state(&self.state, FeedState::Connecting);
        self.live.store(true, Ordering::SeqCst);

        let state = Arc::clone(&self.state);
        let live = Arc::clone(&self.live);
        let tx = self.tx.clone();
        info!(%url, "Connecting ticker stream");
        self.task = Some(tokio::spawn(run_stream(url, symbol, state, live, tx)));
    }

    /// Closes the connection. Idempotent and safe to call in any state.
    ///
    /// After this returns, no further messages from this instance are
    /// delivered: the live flag is checked before every send.
    pub fn disconnect(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        set_state(&self.state, FeedState::Closed);
    }
}

impl Drop for TickerFeed {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn set_state(state: &Mutex<FeedState>, next: FeedState) {
    *state.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = next;
}

/// State transition from the stream task.
///
/// Guarded by the live flag so a disconnect requested while the task is
/// mid-poll wins: both "error occurred" and "disconnect requested" land in
/// a terminal state, and the explicit disconnect is never overwritten.
fn task_set_state(state: &Mutex<FeedState>, live: &AtomicBool, next: FeedState) {
    if live.load(Ordering::SeqCst) {
        set_state(state, next);
    }
}

/// Connects and pumps frames until the stream ends or the feed is torn down.
async fn run_stream(
    url: String,
    symbol: String,
    state: Arc<Mutex<FeedState>>,
    live: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<Message>,
) {
    let (stream, _) = match connect_async(url.as_str()).await {
        Ok(pair) => pair,
        Err(e) => {
            warn!(%url, "Ticker stream connect failed: {e}");
            task_set_state(&state, &live, FeedState::ClosedError);
            deliver(
                &live,
                &tx,
                Message::FeedError {
                    symbol,
                    reason: e.to_string(),
                },
            );
            return;
        }
    };

    task_set_state(&state, &live, FeedState::Open);
    info!(%symbol, "Ticker stream open");
    deliver(
        &live,
        &tx,
        Message::FeedConnected {
            symbol: symbol.clone(),
        },
    );

    let (_, mut read) = stream.split();
    loop {
        match read.next().await {
            Some(Ok(WsMessage::Text(text))) => {
                handle_frame(&text, &symbol, &live, &tx);
            }
            Some(Ok(_)) => {} // Binary/Ping/Pong/Close frames
            Some(Err(e)) => {
                warn!(%symbol, "Ticker stream error: {e}");
                task_set_state(&state, &live, FeedState::ClosedError);
                deliver(
                    &live,
                    &tx,
                    Message::FeedError {
                        symbol,
                        reason: e.to_string(),
                    },
                );
                return;
            }
            None => {
                warn!(%symbol, "Ticker stream ended");
                task_set_state(&state, &live, FeedState::ClosedError);
                deliver(
                    &live,
                    &tx,
                    Message::FeedError {
                        symbol,
                        reason: "stream ended".to_string(),
                    },
                );
                return;
            }
        }
    }
}

/// Decodes one text frame and delivers the snapshot.
///
/// Decode failures are non-fatal: an error message is delivered and the
/// connection stays open. Nothing is delivered once the feed is torn down.
fn handle_frame(
    text: &str,
    symbol: &str,
    live: &AtomicBool,
    tx: &mpsc::UnboundedSender<Message>,
) {
    if !live.load(Ordering::SeqCst) {
        return;
    }

    match serde_json::from_str::<TickerEvent>(text) {
        Ok(event) => {
            deliver(
                live,
                tx,
                Message::Ticker {
                    symbol: symbol.to_string(),
                    data: event.into(),
                },
            );
        }
        Err(e) => {
            warn!(%symbol, "Undecodable ticker frame: {e}");
            deliver(
                live,
                tx,
                Message::FeedError {
                    symbol: symbol.to_string(),
                    reason: format!("decode: {e}"),
                },
            );
        }
    }
}

fn deliver(live: &AtomicBool, tx: &mpsc::UnboundedSender<Message>, message: Message) {
    if live.load(Ordering::SeqCst) {
        let _ = tx.send(message);
    }
}

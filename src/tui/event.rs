//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::indicators::IndicatorSet;
use crate::models::OrderBookSnapshot;
use crate::models::candle::Candle;
use crate::models::ticker::TickerSnapshot;
use crate::models::trade::Trade;
use crate::preferences::PanelKind;

use super::app::{App, FeedStatus};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
///
/// Every market-data variant is tagged with the symbol code it was fetched
/// for, so the reducer can drop results that arrive after a switch.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Ticker snapshot from the stream.
    Ticker {
        symbol: String,
        data: TickerSnapshot,
    },
    /// Order book fetch result.
    Book {
        symbol: String,
        book: OrderBookSnapshot,
    },
    /// Recent trades fetch result.
    Trades { symbol: String, trades: Vec<Trade> },
    /// Candle fetch result with derived indicators.
    Chart {
        symbol: String,
        candles: Vec<Candle>,
        indicators: IndicatorSet,
    },

    /// Ticker stream opened.
    FeedConnected { symbol: String },
    /// Ticker stream failed (transport or decode).
    FeedError { symbol: String, reason: String },
}

/// Actions that require external handling by the session controller.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Switch the active symbol.
    SwitchSymbol(String),
    /// Show or hide a panel.
    TogglePanel(PanelKind),
    /// Change the chart interval.
    SetInterval(crate::models::candle::Interval),
    /// Reconnect the ticker feed after an error.
    ReconnectFeed,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// Market-data messages for a symbol other than the active one are stale
/// leftovers from before a switch and are dropped without touching state.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Ticker { symbol, data } => {
            if symbol == app.current_symbol().code {
                app.ticker = Some(data);
                // A frame arriving means the stream is alive, even if a
                // decode error flagged it down moments ago.
                app.feed_status = FeedStatus::Connected;
            }
            None
        }
        Message::Book { symbol, book } => {
            if symbol == app.current_symbol().code {
                app.book = Some(book);
            }
            None
        }
        Message::Trades { symbol, trades } => {
            if symbol == app.current_symbol().code {
                app.trades = trades;
            }
            None
        }
        Message::Chart {
            symbol,
            candles,
            indicators,
        } => {
            if symbol == app.current_symbol().code {
                app.candles = candles;
                app.indicators = Some(indicators);
            }
            None
        }
        Message::FeedConnected { symbol } => {
            if symbol == app.current_symbol().code {
                app.feed_status = FeedStatus::Connected;
            }
            None
        }
        Message::FeedError { symbol, reason } => {
            if symbol == app.current_symbol().code {
                app.feed_status = FeedStatus::Down;
                app.show_error(reason);
            }
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }

        // Symbol selection
        KeyCode::Right | KeyCode::Char('l') => {
            let next = (app.symbol_index + 1) % app.symbols.len();
            app.select_symbol(next);
            Some(Action::SwitchSymbol(app.current_symbol().code.clone()))
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let prev = app
                .symbol_index
                .checked_sub(1)
                .unwrap_or(app.symbols.len() - 1);
            app.select_symbol(prev);
            Some(Action::SwitchSymbol(app.current_symbol().code.clone()))
        }

        // Panel toggles
        KeyCode::Char('1') => toggle(app, PanelKind::Ticker),
        KeyCode::Char('2') => toggle(app, PanelKind::OrderBook),
        KeyCode::Char('3') => toggle(app, PanelKind::Chart),
        KeyCode::Char('4') => toggle(app, PanelKind::Trades),

        // Chart interval cycling
        KeyCode::Char('i') => {
            app.interval = app.interval.next();
            Some(Action::SetInterval(app.interval))
        }

        // Feed reconnect after an error
        KeyCode::Char('r') => {
            if app.feed_status == FeedStatus::Down {
                app.feed_status = FeedStatus::Connecting;
                Some(Action::ReconnectFeed)
            } else {
                None
            }
        }

        _ => None,
    }
}

fn toggle(app: &mut App, kind: PanelKind) -> Option<Action> {
    app.toggle_panel(kind);
    Some(Action::TogglePanel(kind))
}

//! Live crypto market-data dashboard library.
//!
//! Provides typed models for the Binance public REST and WebSocket APIs,
//! a technical-indicator library, and the feed/scheduler/session plumbing
//! that keeps the terminal dashboard's panels refreshed.

pub mod config;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod models;
pub mod preferences;
pub mod rest;
pub mod scheduler;
pub mod session;
pub mod tui;

pub use error::{MarketdeckError, Result};

//! Crate-level error types.
//!
//! [`MarketdeckError`] unifies every error source (configuration, HTTP,
//! WebSocket, JSON, malformed exchange payloads) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarketdeckError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum MarketdeckError {
    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request to the REST API failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The exchange returned a structurally valid but unusable payload.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// Terminal or filesystem I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

//! Error types for transport operations.

use thiserror::Error;

/// Error type for transport operations.
///
/// Describes how the exchange failed before any HTTP status was received.
/// Mapping these onto user-facing messages is left to the classifier.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request was sent but no response arrived.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and connections dropped mid-response.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport gave up waiting for the server.
    ///
    /// Raised when the configured request timeout elapses.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built by the HTTP library.
    ///
    /// This indicates a construction fault rather than a network failure.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

//! Error type for faults raised while preparing a request.

use thiserror::Error;

/// A fault raised by the request pipeline.
///
/// These are construction faults: the request never reached the transport.
/// They propagate to the caller unchanged in meaning and classify as
/// [`crate::ErrorKind::Unknown`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The target URL could not be parsed or resolved.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as given by the caller
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A header value could not be represented on the wire.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeader {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    /// An interceptor rejected the request for its own reasons.
    #[error("{0}")]
    Rejected(String),
}

//! The error type callers of [`crate::ApiClient`] see.
//!
//! Every failure, whether it came from the request pipeline, the transport,
//! an HTTP status, or a logical failure inside a 2xx envelope, reaches the
//! caller as a single [`ClientError`] carrying a display-ready message.

use std::fmt;

use http::StatusCode;

/// Classification of a failed request.
///
/// The message on [`ClientError`] is always usable as-is; the kind exists
/// for programmatic handling (e.g. redirecting to login on
/// `HttpStatus(401)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 2xx transport, but the envelope `code` signalled an application error.
    LogicalFailure,
    /// The backend answered with a non-2xx status.
    HttpStatus(StatusCode),
    /// The transport-level timeout elapsed.
    Timeout,
    /// The request was sent but no response arrived.
    NoResponse,
    /// Anything else, typically a fault while building the request.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogicalFailure => write!(f, "logical failure"),
            Self::HttpStatus(status) => write!(f, "http status {}", status.as_u16()),
            Self::Timeout => write!(f, "timeout"),
            Self::NoResponse => write!(f, "no response"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A classified request failure.
///
/// Displays as its human-readable message. The underlying fault, when there
/// is one, is reachable through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    source_status: Option<StatusCode>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClientError {
    /// Creates an error of the given kind with a display message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let source_status = match kind {
            ErrorKind::HttpStatus(status) => Some(status),
            _ => None,
        };
        Self {
            kind,
            message: message.into(),
            source_status,
            source: None,
        }
    }

    /// Records the HTTP status the failure was derived from.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.source_status = Some(status);
        self
    }

    /// Attaches the underlying fault.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status of the response, if one was received.
    ///
    /// Set for [`ErrorKind::HttpStatus`] and for logical failures (where it
    /// is the 2xx status that carried the envelope).
    #[must_use]
    pub const fn source_status(&self) -> Option<StatusCode> {
        self.source_status
    }

    /// Returns true if the backend rejected the caller's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::HttpStatus(StatusCode::UNAUTHORIZED)
    }
}

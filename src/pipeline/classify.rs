//! Failure classification.
//!
//! Maps every way a request can fail onto the stable [`ErrorKind`] taxonomy
//! with a display-ready message.

use http::StatusCode;
use url::Url;

use super::response::{LogicalFailure, body_message, decode_json};
use super::PipelineError;
use crate::error::{ClientError, ErrorKind};
use crate::transport::{HttpResponse, TransportError};

/// User-facing messages for classified failures.
pub mod messages {
    /// Transport-level timeout.
    pub const TIMEOUT: &str = "request timed out, possibly due to long model processing.";
    /// Request sent, no response.
    pub const NO_RESPONSE: &str = "network unreachable; check connection or backend availability.";
    /// Fault with no description of its own.
    pub const UNKNOWN: &str = "unknown error";
    /// 400
    pub const BAD_REQUEST: &str = "invalid request parameters";
    /// 401
    pub const UNAUTHORIZED: &str = "unauthorized, please log in again";
    /// 403
    pub const FORBIDDEN: &str = "access denied";
    /// 404, followed by the requested URL
    pub const NOT_FOUND_PREFIX: &str = "requested address not found: ";
    /// 405
    pub const METHOD_NOT_ALLOWED: &str = "method not allowed, check CORS configuration";
    /// 408
    pub const REQUEST_TIMEOUT: &str = "request timeout";
    /// 500
    pub const INTERNAL_SERVER_ERROR: &str = "internal server error";
    /// 502
    pub const BAD_GATEWAY: &str = "bad gateway";
    /// 503
    pub const SERVICE_UNAVAILABLE: &str = "service unavailable";
    /// 504
    pub const GATEWAY_TIMEOUT: &str = "gateway timeout";
}

/// Every way a request can fail before it yields a payload.
#[derive(Debug)]
pub enum Failure {
    /// The request pipeline rejected the config.
    Pipeline(PipelineError),
    /// The transport failed to complete the exchange.
    Transport(TransportError),
    /// The backend answered with a non-2xx status.
    Status {
        /// The URL the request was sent to
        url: Url,
        /// The full response
        response: HttpResponse,
    },
    /// A 2xx envelope reported an application-level error.
    Logical(LogicalFailure),
}

impl From<PipelineError> for Failure {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<TransportError> for Failure {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<LogicalFailure> for Failure {
    fn from(e: LogicalFailure) -> Self {
        Self::Logical(e)
    }
}

/// Maps raw failures onto [`ClientError`]s.
///
/// Precedence: transport timeout, then received status, then no response,
/// then anything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Creates the classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies a failure.
    #[must_use]
    pub fn classify(&self, failure: Failure) -> ClientError {
        let error = match failure {
            Failure::Transport(TransportError::Timeout) => {
                ClientError::new(ErrorKind::Timeout, messages::TIMEOUT)
            }
            Failure::Status { url, response } => Self::classify_status(&url, &response),
            Failure::Transport(e @ TransportError::Connection(_)) => {
                ClientError::new(ErrorKind::NoResponse, messages::NO_RESPONSE).with_source(e)
            }
            Failure::Transport(e @ TransportError::InvalidRequest(_)) => Self::unknown(e),
            Failure::Pipeline(e) => Self::unknown(e),
            Failure::Logical(logical) => {
                ClientError::new(ErrorKind::LogicalFailure, logical.message)
                    .with_status(logical.status)
            }
        };

        tracing::error!(kind = %error.kind(), "{}", error.message());
        error
    }

    fn classify_status(url: &Url, response: &HttpResponse) -> ClientError {
        let status = response.status;
        let body = decode_json(&response.body);
        tracing::error!(status = status.as_u16(), body = %body, "Backend returned an error status");

        let message = body_message(&body)
            .map_or_else(|| Self::status_message(status, url), ToString::to_string);
        ClientError::new(ErrorKind::HttpStatus(status), message)
    }

    /// Returns the default message for a status code.
    #[must_use]
    pub fn status_message(status: StatusCode, url: &Url) -> String {
        let text = match status {
            StatusCode::BAD_REQUEST => messages::BAD_REQUEST,
            StatusCode::UNAUTHORIZED => messages::UNAUTHORIZED,
            StatusCode::FORBIDDEN => messages::FORBIDDEN,
            StatusCode::NOT_FOUND => return format!("{}{url}", messages::NOT_FOUND_PREFIX),
            StatusCode::METHOD_NOT_ALLOWED => messages::METHOD_NOT_ALLOWED,
            StatusCode::REQUEST_TIMEOUT => messages::REQUEST_TIMEOUT,
            StatusCode::INTERNAL_SERVER_ERROR => messages::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY => messages::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE => messages::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT => messages::GATEWAY_TIMEOUT,
            other => return format!("request error: {}", other.as_u16()),
        };
        text.to_string()
    }

    fn unknown<E: std::error::Error + Send + Sync + 'static>(fault: E) -> ClientError {
        let description = fault.to_string();
        let message = if description.is_empty() {
            messages::UNKNOWN.to_string()
        } else {
            description
        };
        ClientError::new(ErrorKind::Unknown, message).with_source(fault)
    }
}

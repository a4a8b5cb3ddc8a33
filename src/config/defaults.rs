//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default request timeout in seconds, sized for slow model responses.
pub const TIMEOUT_SECS: u64 = 120;

/// Default display duration for logical-failure notices, in milliseconds.
pub const LOGICAL_FAILURE_MS: u64 = 3000;

/// Default display duration for classified error notices, in milliseconds.
pub const ERROR_MS: u64 = 5000;

/// Default base URL of the chat/session/user backend.
pub const BACKEND_URL: &str = "http://localhost:8080";

/// Default base URL of the model service.
pub const MODEL_URL: &str = "http://localhost:8000";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default logical-failure notice duration as Duration.
#[must_use]
pub const fn logical_failure_duration() -> Duration {
    Duration::from_millis(LOGICAL_FAILURE_MS)
}

/// Default error notice duration as Duration.
#[must_use]
pub const fn error_duration() -> Duration {
    Duration::from_millis(ERROR_MS)
}

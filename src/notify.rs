//! User-facing notifications.
//!
//! Failures are surfaced to the user as transient notices through an
//! injected [`NotificationSink`]. The sink is a side channel: nothing it
//! does, including failing, changes what the caller of a request receives.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use thiserror::Error;

use crate::config::defaults;
use crate::error::{ClientError, ErrorKind};

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice
    Info,
    /// Positive confirmation
    Success,
    /// Something the user should look at
    Warning,
    /// A failed request
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// A transient, non-blocking notice for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user
    pub message: String,
    /// Display severity
    pub severity: Severity,
    /// How long the notice stays visible
    pub duration: Duration,
}

impl Notification {
    /// Creates an error-severity notification.
    #[must_use]
    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            duration,
        }
    }
}

/// Error raised by a sink that could not present a notice.
#[derive(Debug, Error)]
#[error("Failed to display notification: {0}")]
pub struct NotifyError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

/// Capability for presenting notices to the user.
///
/// Implementations should not block. A returned error is logged by the
/// client and otherwise ignored.
pub trait NotificationSink: Send + Sync {
    /// Presents a notice.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the notice could not be displayed.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

impl<S: NotificationSink + ?Sized> NotificationSink for &S {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        (**self).notify(notification)
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        (**self).notify(notification)
    }
}

/// Display durations for failure notices.
///
/// Classified transport/HTTP failures stay visible longer than logical
/// failures reported inside a successful envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyPolicy {
    /// Duration for envelope-level logical failures
    pub logical_failure: Duration,
    /// Duration for every other classified failure
    pub error: Duration,
}

impl Default for NotifyPolicy {
    fn default() -> Self {
        Self {
            logical_failure: defaults::logical_failure_duration(),
            error: defaults::error_duration(),
        }
    }
}

impl NotifyPolicy {
    /// Builds the notice for a classified failure.
    #[must_use]
    pub fn notification_for(&self, error: &ClientError) -> Notification {
        let duration = match error.kind() {
            ErrorKind::LogicalFailure => self.logical_failure,
            _ => self.error,
        };
        Notification::error(error.message(), duration)
    }
}

/// Sink that records notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let duration_ms = notification.duration.as_millis();
        match notification.severity {
            Severity::Error => {
                tracing::error!(duration_ms, "{}", notification.message);
            }
            Severity::Warning => tracing::warn!(duration_ms, "{}", notification.message),
            Severity::Info | Severity::Success => {
                tracing::info!(duration_ms, "{}", notification.message);
            }
        }
        Ok(())
    }
}

/// Sink that prints notices to standard error.
///
/// Used by the command-line front end in place of on-screen toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr().lock();
        writeln!(
            stderr,
            "[{}] {}",
            notification.severity, notification.message
        )
        .map_err(|e| NotifyError(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn default_policy_gives_errors_longer_dwell_time() {
        let policy = NotifyPolicy::default();

        assert_eq!(policy.logical_failure, Duration::from_millis(3000));
        assert_eq!(policy.error, Duration::from_millis(5000));
        assert!(policy.error > policy.logical_failure);
    }

    #[test]
    fn logical_failure_uses_short_duration() {
        let policy = NotifyPolicy::default();
        let error = ClientError::new(ErrorKind::LogicalFailure, "db down");

        let notice = policy.notification_for(&error);

        assert_eq!(notice.message, "db down");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.duration, policy.logical_failure);
    }

    #[test]
    fn classified_failures_use_error_duration() {
        let policy = NotifyPolicy::default();
        let kinds = [
            ErrorKind::HttpStatus(StatusCode::BAD_GATEWAY),
            ErrorKind::Timeout,
            ErrorKind::NoResponse,
            ErrorKind::Unknown,
        ];

        for kind in kinds {
            let notice = policy.notification_for(&ClientError::new(kind, "x"));
            assert_eq!(notice.duration, policy.error, "kind {kind}");
        }
    }

    #[test]
    fn tracing_sink_never_fails() {
        let sink = TracingSink;
        let notice = Notification::error("boom", Duration::from_secs(5));

        assert!(sink.notify(&notice).is_ok());
    }

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}

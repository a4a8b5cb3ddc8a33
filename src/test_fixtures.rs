//! Shared mocks for client, pipeline, and API tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::Endpoints;
use crate::notify::{Notification, NotificationSink, NotifyError};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Mock transport that returns a configurable sequence of outcomes.
#[derive(Debug)]
pub struct MockTransport {
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Answers once with `status` and a raw body.
    pub fn respond(status: u16, body: &str) -> Self {
        let status = http::StatusCode::from_u16(status).unwrap();
        Self::new(vec![Ok(HttpResponse::with_status(status, body))])
    }

    /// Fails once with the given transport error.
    pub fn fail(error: TransportError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests().pop().unwrap()
    }
}

impl HttpClient for MockTransport {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

/// Sink that records every notification.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn only(&self) -> Notification {
        let notifications = self.notifications();
        assert_eq!(notifications.len(), 1, "expected exactly one notification");
        notifications.into_iter().next().unwrap()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }
}

/// Sink whose display always fails.
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl NotificationSink for FailingSink {
    fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError(Box::new(std::io::Error::other("display gone"))))
    }
}

/// Endpoints pointing at the default local services.
pub fn local_endpoints() -> Endpoints {
    Endpoints::new(
        url::Url::parse(crate::config::defaults::BACKEND_URL).unwrap(),
        url::Url::parse(crate::config::defaults::MODEL_URL).unwrap(),
    )
}

//! The configured HTTP client callers talk to.

use std::time::Duration;

use http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::defaults;
use crate::error::{ClientError, ErrorKind};
use crate::notify::{NotificationSink, NotifyPolicy};
use crate::pipeline::{
    BearerAuth, DefaultHeaders, ErrorClassifier, Failure, RequestConfig, RequestInterceptor,
    RequestPipeline, ResponsePipeline, StaticCredential, TraceRequest,
};
use crate::transport::HttpClient;

/// Static client configuration, read-only once the client is built.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL that relative request URLs are joined onto
    pub base_url: Option<Url>,
    /// Timeout applied to requests that do not set their own
    pub timeout: Duration,
    /// Headers added to every request unless the caller set them
    pub headers: HeaderMap,
    /// Bearer token attached to every request, if any
    pub bearer: Option<String>,
    /// Notification display durations
    pub notify: NotifyPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: defaults::timeout(),
            headers: DefaultHeaders::json().headers().clone(),
            bearer: None,
            notify: NotifyPolicy::default(),
        }
    }
}

/// HTTP client with request tracing, envelope normalization, and a unified
/// error taxonomy.
///
/// Every call to [`request`](Self::request) runs the request pipeline,
/// sends the request through the transport `T`, then either normalizes the
/// payload or classifies the failure. Each failure is reported once to the
/// sink `N` before being returned.
///
/// # Example
///
/// ```no_run
/// use chat_web_client::{ApiClient, ClientSettings, RequestConfig};
/// use chat_web_client::notify::TracingSink;
/// use chat_web_client::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), chat_web_client::ClientError> {
/// let client = ApiClient::new(ReqwestClient::new(), TracingSink, ClientSettings::default());
/// let sessions = client
///     .request(
///         RequestConfig::get("http://localhost:8080/session/getSessions").with_param("userId", 1),
///     )
///     .await?;
/// println!("{sessions}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient<T, N> {
    transport: T,
    sink: N,
    request_pipeline: RequestPipeline,
    response_pipeline: ResponsePipeline,
    classifier: ErrorClassifier,
    base_url: Option<Url>,
    timeout: Duration,
    notify: NotifyPolicy,
}

impl<T: HttpClient, N: NotificationSink> ApiClient<T, N> {
    /// Creates a client with the standard request pipeline.
    ///
    /// The pipeline applies the base headers, attaches the bearer token (if
    /// configured), and traces the request, in that order.
    #[must_use]
    pub fn new(transport: T, sink: N, settings: ClientSettings) -> Self {
        let request_pipeline = RequestPipeline::new()
            .with(DefaultHeaders::new(settings.headers))
            .with(BearerAuth::new(StaticCredential::new(settings.bearer)))
            .with(TraceRequest);

        Self {
            transport,
            sink,
            request_pipeline,
            response_pipeline: ResponsePipeline::new(),
            classifier: ErrorClassifier::new(),
            base_url: settings.base_url,
            timeout: settings.timeout,
            notify: settings.notify,
        }
    }

    /// Replaces the request pipeline.
    #[must_use]
    pub fn with_request_pipeline(mut self, pipeline: RequestPipeline) -> Self {
        self.request_pipeline = pipeline;
        self
    }

    /// Appends an interceptor to the end of the request pipeline.
    #[must_use]
    pub fn with_interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.request_pipeline = self.request_pipeline.with(interceptor);
        self
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the notification sink.
    #[must_use]
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    /// Returns the default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a request and returns the normalized payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] for every kind of failure; the error has
    /// already been reported to the notification sink.
    pub async fn request(&self, config: RequestConfig) -> Result<Value, ClientError> {
        match self.exchange(config).await {
            Ok(payload) => Ok(payload),
            Err(failure) => Err(self.reject(failure)),
        }
    }

    /// Sends a request and deserializes the normalized payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails, or one of kind
    /// [`ErrorKind::Unknown`] if the payload does not match `R`. Both are
    /// reported to the notification sink.
    pub async fn request_as<R: DeserializeOwned>(
        &self,
        config: RequestConfig,
    ) -> Result<R, ClientError> {
        let payload = self.request(config).await?;
        serde_json::from_value(payload).map_err(|e| {
            let error = ClientError::new(ErrorKind::Unknown, format!("unexpected response: {e}"))
                .with_source(e);
            self.report(&error);
            error
        })
    }

    async fn exchange(&self, config: RequestConfig) -> Result<Value, Failure> {
        let config = self.request_pipeline.run(config)?;
        let request = config.into_http_request(self.base_url.as_ref(), self.timeout)?;
        let url = request.url.clone();

        let response = self.transport.request(request).await?;

        if !response.is_success() {
            return Err(Failure::Status { url, response });
        }

        Ok(self.response_pipeline.normalize(&response)?)
    }

    fn reject(&self, failure: Failure) -> ClientError {
        let error = self.classifier.classify(failure);
        self.report(&error);
        error
    }

    fn report(&self, error: &ClientError) {
        let notification = self.notify.notification_for(error);
        if let Err(e) = self.sink.notify(&notification) {
            tracing::warn!("{e}");
        }
    }
}

//! Request description and the request interceptor chain.

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use url::Url;

use super::PipelineError;
use crate::transport::HttpRequest;

/// A request as described by an API-function caller.
///
/// Owned transiently per call. `params` end up in the query string and
/// `data` becomes a JSON body once the pipeline has run.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, or a path relative to the client's base URL
    pub url: String,
    /// Query parameters, in order
    pub params: Vec<(String, String)>,
    /// JSON body
    pub data: Option<serde_json::Value>,
    /// Headers set by the caller or by interceptors
    pub headers: HeaderMap,
    /// Per-request timeout; the client default applies when `None`
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Creates a request with no params, body, or headers.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            data: None,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Serializes `data` into the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Body`] if `data` cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, data: &T) -> Result<Self, PipelineError> {
        Ok(self.with_data(serde_json::to_value(data)?))
    }

    /// Sets a header, replacing any existing value.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves the URL against `base`, appending the query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidUrl`] if the URL does not parse, or is
    /// relative and there is no base to resolve it against.
    pub fn resolve_url(&self, base: Option<&Url>) -> Result<Url, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidUrl {
            url: self.url.clone(),
            reason,
        };

        let mut url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = base.ok_or_else(|| {
                    invalid("relative URL with no base URL configured".to_string())
                })?;
                base.join(&self.url).map_err(|e| invalid(e.to_string()))?
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        if !self.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    /// Converts into a wire request.
    ///
    /// `default_timeout` applies when the config carries none of its own.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the URL cannot be resolved or the body
    /// cannot be serialized.
    pub fn into_http_request(
        self,
        base: Option<&Url>,
        default_timeout: Duration,
    ) -> Result<HttpRequest, PipelineError> {
        let url = self.resolve_url(base)?;
        let mut request = HttpRequest::new(self.method, url)
            .with_timeout(self.timeout.unwrap_or(default_timeout));
        request.headers = self.headers;

        if let Some(data) = self.data {
            request.body = Some(serde_json::to_vec(&data)?);
        }

        Ok(request)
    }
}

/// A single step of the request pipeline.
///
/// Interceptors take ownership of the config and hand back a (possibly
/// augmented) one. Returning an error aborts the request before it is sent.
pub trait RequestInterceptor: Send + Sync {
    /// Transforms the request config.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the config cannot be augmented.
    fn intercept(&self, config: RequestConfig) -> Result<RequestConfig, PipelineError>;
}

/// Ordered chain of request interceptors.
#[derive(Default)]
pub struct RequestPipeline {
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl RequestPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor to the end of the chain.
    #[must_use]
    pub fn with<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Returns the number of interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns true if the chain has no interceptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs every interceptor in order, stopping at the first rejection.
    ///
    /// # Errors
    ///
    /// Returns the first interceptor's error unchanged.
    pub fn run(&self, config: RequestConfig) -> Result<RequestConfig, PipelineError> {
        self.interceptors
            .iter()
            .try_fold(config, |config, interceptor| interceptor.intercept(config))
    }
}

/// Applies the client's base headers.
///
/// Headers already present on the config win over the defaults.
#[derive(Debug, Clone)]
pub struct DefaultHeaders {
    headers: HeaderMap,
}

impl DefaultHeaders {
    /// Creates the interceptor from a set of base headers.
    #[must_use]
    pub const fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Base headers containing only `Content-Type: application/json`.
    #[must_use]
    pub fn json() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self { headers }
    }

    /// Returns the base headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl RequestInterceptor for DefaultHeaders {
    fn intercept(&self, mut config: RequestConfig) -> Result<RequestConfig, PipelineError> {
        for (name, value) in &self.headers {
            if !config.headers.contains_key(name) {
                config.headers.insert(name.clone(), value.clone());
            }
        }
        Ok(config)
    }
}

/// Source of an authorization credential from ambient session state.
pub trait CredentialSource: Send + Sync {
    /// Returns the current bearer token, if the session has one.
    fn token(&self) -> Option<String>;
}

/// A fixed credential, e.g. one supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    /// Creates a credential source that always yields `token`.
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl CredentialSource for StaticCredential {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Attaches `Authorization: Bearer <token>` when a credential is available.
///
/// An explicit `Authorization` header on the config is left untouched.
#[derive(Debug, Clone)]
pub struct BearerAuth<C> {
    source: C,
}

impl<C: CredentialSource> BearerAuth<C> {
    /// Creates the interceptor around a credential source.
    #[must_use]
    pub const fn new(source: C) -> Self {
        Self { source }
    }
}

impl<C: CredentialSource> RequestInterceptor for BearerAuth<C> {
    fn intercept(&self, mut config: RequestConfig) -> Result<RequestConfig, PipelineError> {
        if config.headers.contains_key(AUTHORIZATION) {
            return Ok(config);
        }
        let Some(token) = self.source.token() else {
            return Ok(config);
        };

        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            PipelineError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
                reason: e.to_string(),
            }
        })?;
        config.headers.insert(AUTHORIZATION, value);
        Ok(config)
    }
}

/// Emits a trace record with the method and URL of every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRequest;

impl RequestInterceptor for TraceRequest {
    fn intercept(&self, config: RequestConfig) -> Result<RequestConfig, PipelineError> {
        tracing::info!(method = %config.method, url = %config.url, "Sending request");
        Ok(config)
    }
}

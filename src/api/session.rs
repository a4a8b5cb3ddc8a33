//! Session endpoints.

use serde_json::Value;

use super::Endpoints;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::notify::NotificationSink;
use crate::pipeline::RequestConfig;
use crate::transport::HttpClient;

/// Session API interface
#[derive(Debug)]
pub struct SessionApi<'a, T, N> {
    client: &'a ApiClient<T, N>,
    endpoints: &'a Endpoints,
}

impl<'a, T: HttpClient, N: NotificationSink> SessionApi<'a, T, N> {
    /// Creates the interface over a client.
    #[must_use]
    pub const fn new(client: &'a ApiClient<T, N>, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Lists a user's sessions.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn list(&self, user_id: i64) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("session/getSessions");
        self.client
            .request(RequestConfig::get(url).with_param("userId", user_id))
            .await
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn create(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("session/add");
        self.client
            .request(RequestConfig::post(url).with_data(data))
            .await
    }
}

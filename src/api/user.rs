//! User account endpoints.

use serde_json::Value;

use super::Endpoints;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::notify::NotificationSink;
use crate::pipeline::RequestConfig;
use crate::transport::HttpClient;

/// User API interface
#[derive(Debug)]
pub struct UserApi<'a, T, N> {
    client: &'a ApiClient<T, N>,
    endpoints: &'a Endpoints,
}

impl<'a, T: HttpClient, N: NotificationSink> UserApi<'a, T, N> {
    /// Creates the interface over a client.
    #[must_use]
    pub const fn new(client: &'a ApiClient<T, N>, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Logs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn login(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("user/login");
        self.client
            .request(RequestConfig::post(url).with_data(data))
            .await
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn register(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("user/register");
        self.client
            .request(RequestConfig::post(url).with_data(data))
            .await
    }
}

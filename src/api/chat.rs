//! Chat endpoints: asking the model and chat history CRUD.

use serde_json::Value;

use super::Endpoints;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::notify::NotificationSink;
use crate::pipeline::RequestConfig;
use crate::transport::HttpClient;

/// Chat API interface
#[derive(Debug)]
pub struct ChatApi<'a, T, N> {
    client: &'a ApiClient<T, N>,
    endpoints: &'a Endpoints,
}

impl<'a, T: HttpClient, N: NotificationSink> ChatApi<'a, T, N> {
    /// Creates the interface over a client.
    #[must_use]
    pub const fn new(client: &'a ApiClient<T, N>, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Sends a question to the model service.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn ask(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.model_url("chatbyqwen3");
        self.client
            .request(RequestConfig::post(url).with_data(data))
            .await
    }

    /// Lists the chats in a session.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn list(&self, user_id: i64, session_id: i64) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("chat/getChats");
        let config = RequestConfig::get(url)
            .with_param("userId", user_id)
            .with_param("sessionId", session_id);
        self.client.request(config).await
    }

    /// Stores a chat message.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn add(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("chat/addChat");
        self.client
            .request(RequestConfig::post(url).with_data(data))
            .await
    }

    /// Deletes the chats of a session.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn delete(&self, session_id: i64) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("chat/deleteChat");
        self.client
            .request(RequestConfig::delete(url).with_param("sessionId", session_id))
            .await
    }

    /// Updates a chat message.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ClientError`] if the request fails.
    pub async fn update(&self, data: Value) -> Result<Value, ClientError> {
        let url = self.endpoints.backend_url("chat/updateChat");
        self.client
            .request(RequestConfig::put(url).with_data(data))
            .await
    }
}

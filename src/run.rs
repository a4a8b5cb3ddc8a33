//! Application execution logic.
//!
//! Builds the client from validated configuration, performs the requested
//! action, and prints the payload.

use serde_json::Value;
use thiserror::Error;

use chat_web_client::api::{ChatApi, Endpoints, SessionApi};
use chat_web_client::config::{Action, ValidatedConfig};
use chat_web_client::notify::{ConsoleSink, NotificationSink};
use chat_web_client::transport::{HttpClient, ReqwestClient, TransportError};
use chat_web_client::{ApiClient, ClientError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP transport.
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[source] TransportError),

    /// The request failed; the user has already been notified.
    #[error("{0}")]
    Request(#[source] ClientError),

    /// Failed to render the payload.
    #[error("Failed to render response: {0}")]
    Output(#[source] serde_json::Error),
}

/// Executes the configured action and prints the payload to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP transport cannot be created
/// - The request fails (already reported through the notification sink)
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let Some(action) = config.action else {
        return Ok(());
    };

    let transport =
        ReqwestClient::with_timeout(config.settings.timeout).map_err(RunError::Transport)?;
    let client = ApiClient::new(transport, ConsoleSink, config.settings);

    let payload = perform(&client, &config.endpoints, action)
        .await
        .map_err(RunError::Request)?;

    println!("{}", render(&payload)?);
    Ok(())
}

/// Dispatches an action to the matching API call.
async fn perform<T: HttpClient, N: NotificationSink>(
    client: &ApiClient<T, N>,
    endpoints: &Endpoints,
    action: Action,
) -> Result<Value, ClientError> {
    match action {
        Action::Request(request) => client.request(request).await,
        Action::Ask(data) => ChatApi::new(client, endpoints).ask(data).await,
        Action::Chats {
            user_id,
            session_id,
        } => ChatApi::new(client, endpoints).list(user_id, session_id).await,
        Action::Sessions { user_id } => SessionApi::new(client, endpoints).list(user_id).await,
    }
}

/// Renders a payload for the terminal; bare strings print without quotes.
fn render(payload: &Value) -> Result<String, RunError> {
    match payload {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other).map_err(RunError::Output),
    }
}

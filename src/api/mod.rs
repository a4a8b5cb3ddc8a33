//! Typed API functions for the chat backend.
//!
//! Each module wraps one group of endpoints on top of
//! [`ApiClient::request`](crate::ApiClient::request). They add no policy of
//! their own: tracing, envelope unwrapping, and error reporting all come from
//! the client.
//!
//! | Module | Service | Endpoints |
//! |--------|---------|-----------|
//! | `chat` | model, backend | `chatbyqwen3`, `chat/getChats`, `chat/addChat`, `chat/deleteChat`, `chat/updateChat` |
//! | `session` | backend | `session/getSessions`, `session/add` |
//! | `user` | backend | `user/login`, `user/register` |

pub mod chat;
pub mod session;
pub mod user;


pub use chat::ChatApi;
pub use session::SessionApi;
pub use user::UserApi;

use url::Url;

/// Base URLs of the services the frontend talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Chat, session, and user backend
    pub backend: Url,
    /// Model service
    pub model: Url,
}

impl Endpoints {
    /// Creates endpoints from explicit base URLs.
    #[must_use]
    pub const fn new(backend: Url, model: Url) -> Self {
        Self { backend, model }
    }

    pub(crate) fn backend_url(&self, path: &str) -> String {
        join(&self.backend, path)
    }

    pub(crate) fn model_url(&self, path: &str) -> String {
        join(&self.model, path)
    }
}

fn join(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

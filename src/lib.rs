//! Chat Web Client
//!
//! The HTTP client core of a chat frontend. Every request passes through a
//! request pipeline (common headers, credentials, tracing), the transport,
//! and then either envelope normalization or failure classification, so
//! callers see one predictable contract: a payload, or a [`ClientError`]
//! that has already been shown to the user.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod transport;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod test_fixtures;

pub use client::{ApiClient, ClientSettings};
pub use error::{ClientError, ErrorKind};
pub use pipeline::RequestConfig;

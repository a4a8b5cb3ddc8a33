//! Transport layer for sending HTTP requests to the chat backend.
//!
//! This module provides types and traits for:
//! - Building wire-level HTTP requests ([`HttpRequest`])
//! - Handling buffered HTTP responses ([`HttpResponse`])
//! - Abstracting the HTTP library ([`HttpClient`])
//! - Production transport implementation ([`ReqwestClient`])
//!
//! Nothing here interprets response bodies or status codes; that is the job
//! of [`crate::pipeline`].

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;

pub use client::ReqwestClient;
pub use error::TransportError;
pub use http::{HttpClient, HttpRequest, HttpResponse};

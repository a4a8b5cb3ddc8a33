//! Request and response pipelines.
//!
//! This module provides:
//! - The caller-facing request description ([`RequestConfig`])
//! - The ordered request interceptor chain ([`RequestPipeline`])
//! - Envelope detection and payload normalization ([`ResponsePipeline`])
//! - Failure classification ([`ErrorClassifier`])
//!
//! # Ordering
//!
//! For a single call the request pipeline completes (or rejects) strictly
//! before transmission, and response handling runs strictly after the
//! transport completes. Interceptors run left to right; the first rejection
//! short-circuits the rest of the chain.

mod classify;
mod error;
mod request;
mod response;


pub use classify::{ErrorClassifier, Failure, messages};
pub use error::PipelineError;
pub use request::{
    BearerAuth, CredentialSource, DefaultHeaders, RequestConfig, RequestInterceptor,
    RequestPipeline, StaticCredential, TraceRequest,
};
pub use response::{Envelope, LogicalFailure, ResponseBody, ResponsePipeline, SUCCESS_CODE};

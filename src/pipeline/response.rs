//! Success-path response handling: envelope detection and unwrapping.

use http::StatusCode;
use serde_json::{Map, Value};

use crate::transport::HttpResponse;

/// Envelope `code` value that signals logical success.
pub const SUCCESS_CODE: i64 = 200;

#[allow(clippy::cast_precision_loss)]
const SUCCESS_CODE_F64: f64 = SUCCESS_CODE as f64;

/// Fallback message for a logical failure whose envelope carries none.
const DEFAULT_LOGICAL_FAILURE_MESSAGE: &str = "request error";

/// A decoded response body, discriminated by shape.
///
/// Exactly one shape is chosen per response. A JSON object carrying a
/// `code` or `msg` key is an [`Envelope`]; anything else, `null` included,
/// is a bare payload handed to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body is the payload itself.
    Bare(Value),
    /// The body wraps the payload as `{ code, data, msg }`.
    Envelope(Envelope),
}

impl ResponseBody {
    /// Decodes raw body bytes and discriminates the shape.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Self {
        Self::from_value(decode_json(bytes))
    }

    /// Discriminates an already-decoded value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if Envelope::is_envelope(&map) => Self::Envelope(Envelope(map)),
            other => Self::Bare(other),
        }
    }
}

/// An envelope-shaped body: `{ code, data, msg?, message? }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    fn is_envelope(map: &Map<String, Value>) -> bool {
        map.contains_key("code") || map.contains_key("msg")
    }

    /// Returns the `code` field; a `null` code counts as absent.
    #[must_use]
    pub fn code(&self) -> Option<&Value> {
        self.0.get("code").filter(|code| !code.is_null())
    }

    /// Returns true unless `code` is present and differs from [`SUCCESS_CODE`].
    ///
    /// The comparison is numeric, so `200.0` succeeds; strings never do.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code().is_none_or(is_success_code)
    }

    /// Returns the envelope's own message (`msg`, then `message`).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        object_message(&self.0)
    }

    /// Unwraps the payload: `data` when the key is present (even if `null`),
    /// otherwise the whole envelope.
    #[must_use]
    pub fn into_payload(mut self) -> Value {
        self.0.remove("data").unwrap_or(Value::Object(self.0))
    }
}

/// A 2xx response whose envelope reported an application-level error.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalFailure {
    /// HTTP status that carried the envelope
    pub status: StatusCode,
    /// The envelope's non-success code
    pub code: Value,
    /// Message to show the user
    pub message: String,
}

/// Normalizes successful responses into caller-facing payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsePipeline;

impl ResponsePipeline {
    /// Creates the pipeline.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Turns a 2xx response into the payload the caller receives.
    ///
    /// Bare bodies pass through unchanged. Envelopes with a successful (or
    /// missing) code are unwrapped to `data`, or returned whole if they have
    /// no `data`.
    ///
    /// # Errors
    ///
    /// Returns [`LogicalFailure`] when the envelope `code` is present and
    /// not [`SUCCESS_CODE`].
    pub fn normalize(&self, response: &HttpResponse) -> Result<Value, LogicalFailure> {
        tracing::debug!(status = %response.status, bytes = response.body.len(), "Response received");

        match ResponseBody::decode(&response.body) {
            ResponseBody::Bare(payload) => Ok(payload),
            ResponseBody::Envelope(envelope) if envelope.is_success() => {
                Ok(envelope.into_payload())
            }
            ResponseBody::Envelope(envelope) => {
                let message = envelope
                    .message()
                    .unwrap_or(DEFAULT_LOGICAL_FAILURE_MESSAGE)
                    .to_string();
                let code = envelope.code().cloned().unwrap_or(Value::Null);
                Err(LogicalFailure {
                    status: response.status,
                    code,
                    message,
                })
            }
        }
    }
}

fn is_success_code(code: &Value) -> bool {
    match code {
        Value::Number(n) => match n.as_i64() {
            Some(code) => code == SUCCESS_CODE,
            None => n
                .as_f64()
                .is_some_and(|code| (code - SUCCESS_CODE_F64).abs() < f64::EPSILON),
        },
        _ => false,
    }
}

/// Decodes a body: empty is `null`, non-JSON text becomes a JSON string.
pub(crate) fn decode_json(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Returns a body's own message (`msg`, then `message`), ignoring blanks.
pub(crate) fn body_message(value: &Value) -> Option<&str> {
    value.as_object().and_then(object_message)
}

fn object_message(map: &Map<String, Value>) -> Option<&str> {
    ["msg", "message"]
        .into_iter()
        .filter_map(|key| map.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

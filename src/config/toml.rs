//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// HTTP client configuration section
    #[serde(default)]
    pub client: ClientSection,

    /// Service endpoint configuration
    #[serde(default)]
    pub endpoints: EndpointsSection,

    /// Notification configuration
    #[serde(default)]
    pub notify: NotifySection,
}

/// HTTP client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Base URL for relative request URLs
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,
}

/// Service endpoint configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    /// Chat/session/user backend URL
    pub backend: Option<String>,

    /// Model service URL
    pub model: Option<String>,
}

/// Notification configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Logical-failure notice duration in milliseconds
    pub logical_failure_ms: Option<u64>,

    /// Error notice duration in milliseconds
    pub error_ms: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Chat Web Client Configuration File

[client]
# Base URL for relative request URLs (optional)
# base_url = "http://localhost:8080"

# Request timeout in seconds (default: 120)
timeout = 120

# Bearer token for Authorization header
# bearer = "your-token-here"

# Extra HTTP headers (Content-Type: application/json is always sent)
# [client.headers]
# X-Custom-Header = "value"

[endpoints]
# Chat, session, and user backend (default: http://localhost:8080)
# backend = "http://localhost:8080"

# Model service (default: http://localhost:8000)
# model = "http://localhost:8000"

[notify]
# Notice duration for failures reported inside a successful response (default: 3000)
# logical_failure_ms = 3000

# Notice duration for timeouts, HTTP errors, and network failures (default: 5000)
# error_ms = 5000
"#
    .to_string()
}

//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::HeaderMap;
use url::Url;

use crate::api::Endpoints;
use crate::client::ClientSettings;
use crate::notify::NotifyPolicy;
use crate::pipeline::RequestConfig;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// What the binary should do once configuration is loaded.
#[derive(Debug, Clone)]
pub enum Action {
    /// Send an arbitrary request.
    Request(RequestConfig),
    /// Ask the model a question.
    Ask(serde_json::Value),
    /// List the chats of a session.
    Chats {
        /// Owning user
        user_id: i64,
        /// Session to list
        session_id: i64,
    },
    /// List the sessions of a user.
    Sessions {
        /// Owning user
        user_id: i64,
    },
}

impl Action {
    /// Builds the action for a subcommand.
    ///
    /// Returns `Ok(None)` for commands that send no request (`init`).
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter or JSON body is malformed.
    pub fn from_command(command: &Command) -> Result<Option<Self>, ConfigError> {
        let action = match command {
            Command::Init { .. } => return Ok(None),
            Command::Request {
                method,
                url,
                params,
                data,
            } => {
                let mut config = RequestConfig::new((*method).into(), url.clone());
                for param in params {
                    let (name, value) = parse_param_string(param)?;
                    config = config.with_param(name, value);
                }
                if let Some(data) = data {
                    config = config.with_data(parse_json(data)?);
                }
                Self::Request(config)
            }
            Command::Ask { data } => Self::Ask(parse_json(data)?),
            Command::Chats {
                user_id,
                session_id,
            } => Self::Chats {
                user_id: *user_id,
                session_id: *session_id,
            },
            Command::Sessions { user_id } => Self::Sessions { user_id: *user_id },
        };
        Ok(Some(action))
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// HTTP client settings
    pub settings: ClientSettings,

    /// Service base URLs for the typed API functions
    pub endpoints: Endpoints,

    /// Request to perform, `None` for commands that send none
    pub action: Option<Action>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_url = self
            .settings
            .base_url
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ base_url: {}, backend: {}, model: {}, timeout: {}s, headers: {}, \
             bearer: {}, notify: {}ms/{}ms }}",
            base_url,
            self.endpoints.backend,
            self.endpoints.model,
            self.settings.timeout.as_secs(),
            self.settings.headers.len(),
            if self.settings.bearer.is_some() {
                "set"
            } else {
                "none"
            },
            self.settings.notify.logical_failure.as_millis(),
            self.settings.notify.error.as_millis(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A URL is invalid
    /// - A duration is zero, or the error notice is shorter than the logical-failure one
    /// - Header format is invalid
    /// - Request parameters or JSON body are malformed
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let base_url = Self::resolve_base_url(cli, toml)?;
        let endpoints = Self::resolve_endpoints(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let bearer = Self::resolve_bearer(cli, toml)?;
        let notify = Self::build_notify_policy(toml)?;
        let action = Action::from_command(&cli.command)?;

        Ok(Self {
            settings: ClientSettings {
                base_url,
                timeout,
                headers,
                bearer,
                notify,
            },
            endpoints,
            action,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
        cli.base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.base_url.as_deref()))
            .map(|url| parse_url(field::BASE_URL, url))
            .transpose()
    }

    fn resolve_endpoints(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Endpoints, ConfigError> {
        let backend = cli
            .backend
            .as_deref()
            .or_else(|| toml.and_then(|t| t.endpoints.backend.as_deref()))
            .unwrap_or(defaults::BACKEND_URL);

        let model = cli
            .model
            .as_deref()
            .or_else(|| toml.and_then(|t| t.endpoints.model.as_deref()))
            .unwrap_or(defaults::MODEL_URL);

        Ok(Endpoints::new(
            parse_url(field::BACKEND, backend)?,
            parse_url(field::MODEL, model)?,
        ))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.client.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.client.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn resolve_bearer(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let bearer = cli
            .bearer
            .clone()
            .or_else(|| toml.and_then(|t| t.client.bearer.clone()));

        if let Some(ref token) = bearer {
            parse_header_value("Authorization", &format!("Bearer {token}"))?;
        }

        Ok(bearer)
    }

    fn build_notify_policy(toml: Option<&TomlConfig>) -> Result<NotifyPolicy, ConfigError> {
        let notify = toml.map(|t| &t.notify);

        let logical_failure_ms = notify
            .and_then(|n| n.logical_failure_ms)
            .unwrap_or(defaults::LOGICAL_FAILURE_MS);

        let error_ms = notify
            .and_then(|n| n.error_ms)
            .unwrap_or(defaults::ERROR_MS);

        for (name, value) in [
            (field::LOGICAL_FAILURE_MS, logical_failure_ms),
            (field::ERROR_MS, error_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidDuration {
                    field: name,
                    reason: "must be greater than 0".to_string(),
                });
            }
        }

        if error_ms < logical_failure_ms {
            return Err(ConfigError::InvalidDuration {
                field: field::ERROR_MS,
                reason: format!(
                    "must be >= {} ({logical_failure_ms}ms)",
                    field::LOGICAL_FAILURE_MS
                ),
            });
        }

        Ok(NotifyPolicy {
            logical_failure: Duration::from_millis(logical_failure_ms),
            error: Duration::from_millis(error_ms),
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_url(field: &'static str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn parse_json(data: &str) -> Result<serde_json::Value, ConfigError> {
    serde_json::from_str(data).map_err(ConfigError::InvalidJson)
}

fn parse_param_string(s: &str) -> Result<(String, String), ConfigError> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ConfigError::InvalidParam {
            value: s.to_string(),
        })
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

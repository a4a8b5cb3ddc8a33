//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Chat web client
///
/// Sends requests to the chat backend through the tracing, envelope
/// normalization, and error classification pipelines.
#[derive(Debug, Parser)]
#[command(name = "chat-web-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Base URL for relative request URLs
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Backend URL for chat, session, and user endpoints
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Model service URL
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Bearer token for Authorization header
    #[arg(long, global = true)]
    pub bearer: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for chat-web-client
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "chat-web-client.toml")]
        output: PathBuf,
    },

    /// Send an arbitrary request
    Request {
        /// HTTP method
        #[arg(value_enum, ignore_case = true)]
        method: MethodArg,

        /// Absolute URL, or a path relative to the base URL
        url: String,

        /// Query parameters in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "param", value_name = "K=V")]
        params: Vec<String>,

        /// JSON request body
        #[arg(long)]
        data: Option<String>,
    },

    /// Ask the model a question
    Ask {
        /// JSON request body
        #[arg(long)]
        data: String,
    },

    /// List the chats of a session
    Chats {
        /// Owning user
        #[arg(long = "user-id")]
        user_id: i64,

        /// Session to list
        #[arg(long = "session-id")]
        session_id: i64,
    },

    /// List the sessions of a user
    Sessions {
        /// Owning user
        #[arg(long = "user-id")]
        user_id: i64,
    },
}

/// HTTP method argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl From<MethodArg> for http::Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Get => Self::GET,
            MethodArg::Post => Self::POST,
            MethodArg::Put => Self::PUT,
            MethodArg::Delete => Self::DELETE,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

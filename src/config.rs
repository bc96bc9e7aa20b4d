//! Configuration handling for the Sybase MCP Server.
//!
//! This module provides configuration management via CLI arguments, environment
//! variables and an optional `.env` file.
//! Connection settings are optional at parse time and checked by the explicit
//! [`Config::connection_parameters`] step, so a missing value produces one
//! diagnostic naming every absent variable.

use crate::db::ClientCommand;
use crate::error::{DbError, DbResult};
use crate::models::ConnectionParameters;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";

/// Default external client: the JDBC query program run through `java`.
pub const DEFAULT_CLIENT_PROGRAM: &str = "java";
pub const DEFAULT_CLIENT_CLASS: &str = "SybaseQuery";
pub const DEFAULT_CLIENT_DRIVER_JAR: &str = "jtds-1.3.1.jar";

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// Leading client arguments used when none are configured:
/// `-cp .<sep>jtds-1.3.1.jar SybaseQuery`.
pub fn default_client_args() -> Vec<String> {
    vec![
        "-cp".to_string(),
        format!(".{}{}", CLASSPATH_SEPARATOR, DEFAULT_CLIENT_DRIVER_JAR),
        DEFAULT_CLIENT_CLASS.to_string(),
    ]
}

/// Load a `.env` file from the working directory or one of its parents.
///
/// Variables already set in the process environment are left alone, so a
/// value is taken from the command line first, then the environment, then
/// `.env`, then the built-in default. Returns the path of the loaded file,
/// or `None` when there is no `.env` to load.
pub fn load_dotenv() -> DbResult<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(DbError::config(format!("Failed to load .env file: {}", e))),
    }
}

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Configuration for the Sybase MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sybase-mcp-server",
    about = "MCP server for Sybase catalog inspection and read-only queries",
    version,
    author
)]
pub struct Config {
    /// Sybase server host
    #[arg(long, env = "SYBASE_HOST")]
    pub host: Option<String>,

    /// Sybase server port
    #[arg(long, env = "SYBASE_PORT")]
    pub port: Option<u16>,

    /// Database name
    #[arg(long, env = "SYBASE_DATABASE")]
    pub database: Option<String>,

    /// Login name
    #[arg(long, env = "SYBASE_USERNAME")]
    pub username: Option<String>,

    /// Login password (sensitive - not logged)
    #[arg(long, env = "SYBASE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Program that runs one query against the database
    #[arg(
        long,
        default_value = DEFAULT_CLIENT_PROGRAM,
        env = "SYBASE_CLIENT_PROGRAM"
    )]
    pub client_program: String,

    /// Arguments placed before the connection parameters.
    /// Defaults to "-cp .:jtds-1.3.1.jar SybaseQuery" when empty.
    #[arg(
        long = "client-arg",
        value_name = "ARG",
        env = "SYBASE_CLIENT_ARGS",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub client_args: Vec<String>,

    /// Working directory for the client (where the classpath entries live)
    #[arg(long, env = "SYBASE_CLIENT_DIR")]
    pub client_dir: Option<PathBuf>,

    /// Kill the client and fail the call after this many seconds. Waits indefinitely when unset.
    #[arg(
        long,
        env = "MCP_QUERY_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub query_timeout: Option<u64>,

    /// Reject stored procedure names that are not (optionally qualified) identifiers
    #[arg(long, env = "SYBASE_STRICT_PROCEDURE_NAMES")]
    pub strict_procedure_names: bool,

    /// Transport mode (stdio or http)
    #[arg(
        short,
        long,
        value_enum,
        default_value = "stdio",
        env = "MCP_TRANSPORT"
    )]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_HTTP_HOST,
        env = "MCP_HTTP_HOST"
    )]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(
        long,
        default_value_t = DEFAULT_HTTP_PORT,
        env = "MCP_HTTP_PORT"
    )]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_MCP_ENDPOINT,
        env = "MCP_ENDPOINT"
    )]
    pub mcp_endpoint: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            host: None,
            port: None,
            database: None,
            username: None,
            password: None,
            client_program: DEFAULT_CLIENT_PROGRAM.to_string(),
            client_args: Vec::new(),
            client_dir: None,
            query_timeout: None,
            strict_procedure_names: false,
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Load the connection parameters.
    ///
    /// Unset and empty values both count as missing. The error lists every
    /// missing environment variable.
    pub fn connection_parameters(&self) -> DbResult<ConnectionParameters> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        let host = present(&self.host);
        let database = present(&self.database);
        let username = present(&self.username);
        let password = present(&self.password);

        let missing: Vec<&str> = [
            ("SYBASE_HOST", host.is_none()),
            ("SYBASE_PORT", self.port.is_none()),
            ("SYBASE_DATABASE", database.is_none()),
            ("SYBASE_USERNAME", username.is_none()),
            ("SYBASE_PASSWORD", password.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (host, self.port, database, username, password) {
            (Some(host), Some(port), Some(database), Some(username), Some(password)) => Ok(
                ConnectionParameters::new(host, port, database, username, password),
            ),
            _ => Err(DbError::config(format!(
                "Missing required environment variable(s): {}",
                missing.join(", ")
            ))),
        }
    }

    /// Build the external client command.
    pub fn client_command(&self) -> ClientCommand {
        let args = if self.client_args.is_empty() {
            default_client_args()
        } else {
            self.client_args.clone()
        };
        ClientCommand {
            program: self.client_program.clone(),
            args,
            working_dir: self.client_dir.clone(),
        }
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the query timeout as a Duration.
    pub fn query_timeout_duration(&self) -> Option<Duration> {
        self.query_timeout.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

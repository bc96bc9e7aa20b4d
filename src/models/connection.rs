//! Connection-related data models.
//!
//! This module defines the connection parameters handed to the external
//! database client on every invocation.

use std::fmt;

/// Placeholder printed wherever the password would appear.
const PASSWORD_MASK: &str = "****";

/// Connection parameters for the Sybase server.
///
/// Loaded once at startup (see [`crate::config::Config::connection_parameters`])
/// and shared read-only across all tool invocations.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    /// Contains sensitive data - never log
    pub password: String,
}

impl ConnectionParameters {
    /// Create new connection parameters.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Positional arguments expected by the client, in order:
    /// host, port, database, username, password.
    pub fn client_args(&self) -> [String; 5] {
        [
            self.host.clone(),
            self.port.to_string(),
            self.database.clone(),
            self.username.clone(),
            self.password.clone(),
        ]
    }

    /// Same as [`Self::client_args`] with the password masked, for logging.
    pub fn masked_client_args(&self) -> [String; 5] {
        let mut args = self.client_args();
        args[4] = PASSWORD_MASK.to_string();
        args
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &PASSWORD_MASK)
            .finish()
    }
}

impl fmt::Display for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }
}

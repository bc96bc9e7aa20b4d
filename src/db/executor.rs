//! Query execution through the external database client.
//!
//! Every statement runs in a fresh client process:
//!
//! ```text
//! <program> <leading args...> <host> <port> <database> <username> <password> <base64 sql>
//! ```
//!
//! The client prints tab-separated rows on stdout and exits 0, or exits
//! non-zero with a diagnostic on stderr. Both streams are buffered in memory;
//! results are catalog-sized, not bulk data.

use crate::db::tabular;
use crate::error::{DbError, DbResult};
use crate::models::{ConnectionParameters, Record, Statement};
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Message used when the client fails without writing to stderr.
const UNKNOWN_CLIENT_ERROR: &str = "Unknown error while running the database client";

/// How to launch the external client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCommand {
    /// Executable to run (e.g. `java`).
    pub program: String,
    /// Arguments placed before the connection parameters (e.g. `-cp ... SybaseQuery`).
    pub args: Vec<String>,
    /// Working directory for the client; inherits ours when `None`.
    pub working_dir: Option<PathBuf>,
}

impl ClientCommand {
    /// Create a client command with no leading arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Append a leading argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Captured result of one client process.
#[derive(Debug)]
struct ClientOutput {
    /// `None` when the process was terminated by a signal.
    exit_code: Option<i32>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl From<Output> for ClientOutput {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

impl ClientOutput {
    /// Stdout on exit code 0, otherwise an execution error carrying stderr.
    fn into_stdout(self) -> DbResult<Vec<u8>> {
        if self.exit_code == Some(0) {
            return Ok(self.stdout);
        }

        let stderr = String::from_utf8_lossy(&self.stderr);
        let stderr = stderr.trim();
        warn!(exit_code = ?self.exit_code, "Database client failed");
        if stderr.is_empty() {
            Err(DbError::execution(UNKNOWN_CLIENT_ERROR))
        } else {
            Err(DbError::execution(stderr))
        }
    }
}

/// Runs statements through the external client and decodes the output.
///
/// Holds only immutable state, so one executor is shared by all concurrent
/// tool calls; each call owns its own child process and buffers.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    connection: Arc<ConnectionParameters>,
    client: ClientCommand,
    /// Bounded wait for the client. `None` waits indefinitely.
    timeout: Option<Duration>,
}

impl QueryExecutor {
    /// Create a new executor with no timeout.
    pub fn new(connection: ConnectionParameters, client: ClientCommand) -> Self {
        Self {
            connection: Arc::new(connection),
            client,
            timeout: None,
        }
    }

    /// Set the bounded wait. On expiry the client is killed.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connection(&self) -> &ConnectionParameters {
        &self.connection
    }

    pub fn client(&self) -> &ClientCommand {
        &self.client
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run a statement and decode its output into records.
    pub async fn execute_query(&self, statement: Statement) -> DbResult<Vec<Record>> {
        let start = Instant::now();
        let stdout = self.run(statement).await?;
        let records = tabular::decode(&stdout);

        debug!(
            bytes = stdout.len(),
            rows = records.len(),
            execution_time_ms = start.elapsed().as_millis() as u64,
            "Decoded client output"
        );
        Ok(records)
    }

    /// Run a statement and return the client's raw stdout.
    pub async fn run(&self, statement: Statement) -> DbResult<Vec<u8>> {
        debug!(
            program = %self.client.program,
            args = ?self.masked_args(&statement),
            sql = %statement,
            "Spawning database client"
        );

        let child = self.command(&statement).spawn().map_err(|e| {
            DbError::execution(format!(
                "Failed to start database client '{}': {}",
                self.client.program, e
            ))
        })?;

        // kill_on_drop: if the timeout drops this future, the child is killed.
        let output = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    warn!(timeout_ms = limit.as_millis() as u64, "Database client timed out");
                    return Err(DbError::timeout(
                        "database client",
                        limit.as_millis() as u64,
                    ));
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(|e| DbError::execution(format!("Failed to read database client output: {}", e)))?;

        let output = ClientOutput::from(output);
        if !output.stderr.is_empty() {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Database client diagnostics"
            );
        }
        output.into_stdout()
    }

    fn command(&self, statement: &Statement) -> Command {
        let mut command = Command::new(&self.client.program);
        command
            .args(self.arguments(statement))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.client.working_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Full argument list after the program name.
    fn arguments(&self, statement: &Statement) -> Vec<String> {
        let mut args = self.client.args.clone();
        args.extend(self.connection.client_args());
        args.push(statement.encoded());
        args
    }

    fn masked_args(&self, statement: &Statement) -> Vec<String> {
        let mut args = self.client.args.clone();
        args.extend(self.connection.masked_client_args());
        args.push(statement.encoded());
        args
    }
}

//! Sybase MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to inspect a Sybase database and run read-only queries through an external
//! database client.

use clap::Parser;
use std::sync::Arc;
use sybase_mcp_server::config::{Config, TransportMode, load_dotenv};
use sybase_mcp_server::db::QueryExecutor;
use sybase_mcp_server::mcp::DbService;
use sybase_mcp_server::transport::{HttpTransport, StdioTransport, Transport};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs always go to stderr: stdout carries the stdio transport.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env must be applied before clap reads the environment
    let dotenv = load_dotenv();

    // Parse configuration from command line and environment
    let config = Config::parse();

    init_tracing(&config);

    match dotenv {
        Ok(Some(path)) => info!(path = %path.display(), "Loaded environment file"),
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Invalid environment file");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let connection = match config.connection_parameters() {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Set the connection through the environment, a .env file or the command line:");
            eprintln!("  SYBASE_HOST      / --host");
            eprintln!("  SYBASE_PORT      / --port");
            eprintln!("  SYBASE_DATABASE  / --database");
            eprintln!("  SYBASE_USERNAME  / --username");
            eprintln!("  SYBASE_PASSWORD  / --password");
            std::process::exit(1);
        }
    };

    info!(
        transport = %config.transport,
        "Starting Sybase MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = config.client_command();
    info!(
        connection = %connection,
        program = %client.program,
        timeout_secs = ?config.query_timeout,
        strict_procedure_names = config.strict_procedure_names,
        "Configured database client"
    );

    let executor = QueryExecutor::new(connection, client)
        .with_timeout(config.query_timeout_duration());
    let service = DbService::new(Arc::new(executor), config.strict_procedure_names);

    let result = match config.transport {
        TransportMode::Stdio => {
            let transport = StdioTransport::new(service);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                service,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

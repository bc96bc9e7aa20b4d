//! Sybase MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to inspect a Sybase catalog and run read-only queries. Every database
//! round-trip is delegated to an external client process whose tab-separated
//! output is decoded into JSON records.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::DbError;
pub use mcp::DbService;

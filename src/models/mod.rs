//! Data models for the Sybase MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod query;

pub use connection::ConnectionParameters;
pub use query::{Record, Statement};

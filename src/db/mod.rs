//! Database access layer.
//!
//! This module provides database access functionality:
//! - Statement building for the catalog queries and stored procedure calls
//! - Statement execution through the external client process
//! - Decoding of the client's tab-separated output

pub mod executor;
pub mod params;
pub mod schema;
pub mod tabular;

pub use executor::{ClientCommand, QueryExecutor};

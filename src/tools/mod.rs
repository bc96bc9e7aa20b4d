//! MCP tool implementations.
//!
//! This module contains all database tool handlers:
//! - `query`: executeQuery, free-form SELECT statements
//! - `schema`: getTableDefinition, listTablesBySchema, getDatabaseSchema
//! - `procedure`: executeStoredProcedure
//! - `sql_validator`: read-only and identifier checks
//! - `format`: success and error payloads

pub mod format;
pub mod procedure;
pub mod query;
pub mod schema;
pub mod sql_validator;

pub use procedure::{ProcedureToolHandler, StoredProcedureInput};
pub use query::{ExecuteQueryInput, QueryToolHandler};
pub use schema::{SchemaToolHandler, TableDefinitionInput};

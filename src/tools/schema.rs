//! Schema introspection tools.
//!
//! This module implements the `getTableDefinition`, `listTablesBySchema` and
//! `getDatabaseSchema` MCP tools, all backed by fixed catalog queries.

use crate::db::{QueryExecutor, schema};
use crate::error::DbResult;
use crate::models::Record;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the getTableDefinition tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableDefinitionInput {
    /// Name of the user table. Letters, digits and underscores only (^[A-Za-z0-9_]+$);
    /// matched case-sensitively.
    #[serde(rename = "tableName")]
    pub table_name: String,
}

pub struct SchemaToolHandler {
    executor: Arc<QueryExecutor>,
}

impl SchemaToolHandler {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Columns of one user table: `column_name`, `data_type`, `length`.
    pub async fn table_definition(&self, input: TableDefinitionInput) -> DbResult<Vec<Record>> {
        let statement = schema::table_definition(&input.table_name)?;

        info!(tool = "getTableDefinition", table = %input.table_name, "Describing table");
        self.executor.execute_query(statement).await
    }

    /// User tables with their owner: `owner`, `table_name`.
    pub async fn list_tables(&self) -> DbResult<Vec<Record>> {
        info!(tool = "listTablesBySchema", "Listing tables");
        self.executor.execute_query(schema::list_tables()).await
    }

    /// Tables, views and procedures with their columns.
    pub async fn database_schema(&self) -> DbResult<Vec<Record>> {
        info!(tool = "getDatabaseSchema", "Dumping database schema");
        self.executor.execute_query(schema::database_schema()).await
    }
}

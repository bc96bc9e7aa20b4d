//! MCP service implementation using rmcp.
//!
//! This module defines the DbService struct with all database tools
//! exposed via the MCP protocol using the rmcp framework's macros.
//! Tool names keep the camelCase names agents already know
//! (`executeQuery`, `getTableDefinition`, ...).

use crate::db::QueryExecutor;
use crate::error::DbResult;
use crate::models::Record;
use crate::tools::format::{error_text, records_to_json};
use crate::tools::procedure::{ProcedureToolHandler, StoredProcedureInput};
use crate::tools::query::{ExecuteQueryInput, QueryToolHandler};
use crate::tools::schema::{SchemaToolHandler, TableDefinitionInput};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct DbService {
    /// Shared executor for all tool calls
    executor: Arc<QueryExecutor>,
    /// Validate procedure names in executeStoredProcedure
    strict_procedure_names: bool,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl DbService {
    /// Create a new DbService instance.
    ///
    /// # Arguments
    ///
    /// * `executor` - Shared executor that runs statements through the external client
    /// * `strict_procedure_names` - Reject non-identifier procedure names before execution
    pub fn new(executor: Arc<QueryExecutor>, strict_procedure_names: bool) -> Self {
        Self {
            executor,
            strict_procedure_names,
            tool_router: Self::tool_router(),
        }
    }
}

/// Convert a handler outcome into the uniform tool result.
///
/// Failures never surface as protocol errors: they become a result flagged
/// `is_error` whose text starts with `Error: `.
fn tool_result(tool: &'static str, result: DbResult<Vec<Record>>) -> CallToolResult {
    let payload = result.and_then(|records| {
        let rows = records.len();
        records_to_json(&records).map(|json| (rows, json))
    });

    match payload {
        Ok((rows, json)) => {
            info!(tool, rows, "Tool completed");
            CallToolResult::success(vec![Content::text(json)])
        }
        Err(e) => {
            warn!(tool, error = %e, "Tool failed");
            CallToolResult::error(vec![Content::text(error_text(&e))])
        }
    }
}

#[tool_router]
impl DbService {
    #[tool(
        name = "executeQuery",
        description = "Execute a read-only SQL query on Sybase and return the rows as a JSON array.\nOnly statements starting with SELECT are accepted. Queries containing INSERT, UPDATE, DELETE, DROP, ALTER or ';' anywhere (even inside identifiers) are rejected."
    )]
    async fn execute_query(
        &self,
        Parameters(input): Parameters<ExecuteQueryInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.executor.clone());
        Ok(tool_result("executeQuery", handler.execute_query(input).await))
    }

    #[tool(
        name = "getTableDefinition",
        description = "Get the column definitions of a Sybase user table.\nReturns column_name, data_type and length for each column. The table name must contain only letters, digits and underscores."
    )]
    async fn get_table_definition(
        &self,
        Parameters(input): Parameters<TableDefinitionInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.executor.clone());
        Ok(tool_result(
            "getTableDefinition",
            handler.table_definition(input).await,
        ))
    }

    #[tool(
        name = "listTablesBySchema",
        description = "List all user tables in the Sybase database with their owner.\nReturns owner and table_name, ordered by owner then table name."
    )]
    async fn list_tables_by_schema(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.executor.clone());
        Ok(tool_result("listTablesBySchema", handler.list_tables().await))
    }

    #[tool(
        name = "getDatabaseSchema",
        description = "Get the full Sybase database schema: user tables (U), views (V) and stored procedures (P) with their columns.\nReturns object_name, object_type, owner_name, column_name, data_type, column_length, precision, scale and column_status."
    )]
    async fn get_database_schema(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.executor.clone());
        Ok(tool_result(
            "getDatabaseSchema",
            handler.database_schema().await,
        ))
    }

    #[tool(
        name = "executeStoredProcedure",
        description = "Execute a Sybase stored procedure and return its result set as a JSON array.\nParameters are positional strings; numeric values are passed unquoted, others are quoted with embedded quotes escaped."
    )]
    async fn execute_stored_procedure(
        &self,
        Parameters(input): Parameters<StoredProcedureInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = ProcedureToolHandler::new(self.executor.clone())
            .with_strict_names(self.strict_procedure_names);
        Ok(tool_result(
            "executeStoredProcedure",
            handler.execute_stored_procedure(input).await,
        ))
    }
}

#[tool_handler]
impl ServerHandler for DbService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sybase-mcp-server".to_owned(),
                title: Some("Sybase MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only tools for inspecting a Sybase database.\n\
                \n\
                ## Workflow\n\
                1. Call `listTablesBySchema` or `getDatabaseSchema` to discover objects\n\
                2. Call `getTableDefinition` for the columns of a table\n\
                3. Use `executeQuery` for SELECT statements and `executeStoredProcedure` for procedures\n\
                \n\
                ## Results\n\
                Every tool returns a JSON array of objects. All values are strings; SQL NULL\n\
                appears as the text \"null\".\n\
                \n\
                ## Query Restrictions\n\
                `executeQuery` accepts only statements starting with SELECT and rejects any query\n\
                containing insert, update, delete, drop, alter or ';' as a substring, including\n\
                inside column names such as `updated_at`. Alias such columns in a view or use a\n\
                stored procedure instead."
                    .to_string(),
            ),
        }
    }
}

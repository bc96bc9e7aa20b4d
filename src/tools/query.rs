//! Query execution tool.
//!
//! This module implements the `executeQuery` MCP tool for running free-form
//! SELECT statements. Anything else is rejected before the client is spawned.

use crate::db::QueryExecutor;
use crate::error::DbResult;
use crate::models::Record;
use crate::tools::sql_validator;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the executeQuery tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteQueryInput {
    /// SQL SELECT statement to execute. Must start with SELECT and must not contain
    /// INSERT, UPDATE, DELETE, DROP, ALTER or ';' anywhere (including inside names).
    pub sql: String,
}

pub struct QueryToolHandler {
    executor: Arc<QueryExecutor>,
}

impl QueryToolHandler {
    /// Create a new query tool handler.
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Handle the executeQuery tool call.
    pub async fn execute_query(&self, input: ExecuteQueryInput) -> DbResult<Vec<Record>> {
        let statement = sql_validator::validate_select(&input.sql)?;

        info!(tool = "executeQuery", "Executing query");
        self.executor.execute_query(statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ClientCommand;
    use crate::error::DbError;
    use crate::models::ConnectionParameters;

    fn handler() -> QueryToolHandler {
        let executor = QueryExecutor::new(
            ConnectionParameters::new("h", 1, "d", "u", "p"),
            ClientCommand::new("definitely-not-a-real-db-client-binary"),
        );
        QueryToolHandler::new(Arc::new(executor))
    }

    #[test]
    fn test_input_deserialization() {
        let input: ExecuteQueryInput =
            serde_json::from_str(r#"{"sql": "SELECT * FROM sysusers"}"#).unwrap();
        assert_eq!(input.sql, "SELECT * FROM sysusers");
    }

    #[test]
    fn test_input_requires_sql() {
        assert!(serde_json::from_str::<ExecuteQueryInput>("{}").is_err());
    }

    #[tokio::test]
    async fn test_rejected_before_spawn() {
        // The client binary does not exist, so a validation error proves no spawn was attempted.
        let err = handler()
            .execute_query(ExecuteQueryInput {
                sql: "UPDATE users SET name = 'x'".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_valid_query_reaches_client() {
        let err = handler()
            .execute_query(ExecuteQueryInput {
                sql: "SELECT 1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Execution { .. }));
    }
}

//! Stored procedure tool.
//!
//! This module implements the `executeStoredProcedure` MCP tool. Parameters
//! are rendered as SQL literals (see [`crate::db::params`]). The procedure name
//! is passed through as given unless strict procedure names are enabled.

use crate::db::{QueryExecutor, params};
use crate::error::DbResult;
use crate::models::Record;
use crate::tools::sql_validator;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the executeStoredProcedure tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StoredProcedureInput {
    /// Stored procedure name, optionally qualified (owner.procedure)
    #[serde(rename = "procedureName")]
    pub procedure_name: String,
    /// Positional parameters. Numeric values are passed bare, anything else as a quoted string.
    #[serde(default)]
    pub params: Option<Vec<String>>,
}

pub struct ProcedureToolHandler {
    executor: Arc<QueryExecutor>,
    strict_names: bool,
}

impl ProcedureToolHandler {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self {
            executor,
            strict_names: false,
        }
    }

    /// Reject procedure names that are not plain (optionally qualified) identifiers.
    pub fn with_strict_names(mut self, strict_names: bool) -> Self {
        self.strict_names = strict_names;
        self
    }

    /// Handle the executeStoredProcedure tool call.
    pub async fn execute_stored_procedure(
        &self,
        input: StoredProcedureInput,
    ) -> DbResult<Vec<Record>> {
        if self.strict_names {
            sql_validator::validate_procedure_name(&input.procedure_name)?;
        }

        let args = input.params.unwrap_or_default();
        let statement = params::procedure_call(&input.procedure_name, &args);

        info!(
            tool = "executeStoredProcedure",
            procedure = %input.procedure_name,
            params = args.len(),
            "Executing stored procedure"
        );
        self.executor.execute_query(statement).await
    }
}

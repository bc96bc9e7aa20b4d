//! SQL statement validation for read-only enforcement.
//!
//! The external client takes the statement as plain text, with no bind
//! parameters, so these checks are the only injection defense. They are
//! deliberately coarse:
//!
//! - free-form SQL must start with `select` and must not contain any
//!   [`FORBIDDEN_KEYWORDS`] entry anywhere, as a plain substring. A column
//!   named `dropped_at` or `updated_by` is rejected too.
//! - table names must be non-empty ASCII `[A-Za-z0-9_]` identifiers.
//! - procedure names, when strict checking is enabled, are up to three
//!   dot-separated identifier parts (`db.owner.proc`).

use crate::db::tabular::trim_text;
use crate::error::{DbError, DbResult};
use crate::models::Statement;

/// Substrings whose presence rejects a query, checked in this order.
pub const FORBIDDEN_KEYWORDS: [&str; 6] = ["insert", "update", "delete", "drop", "alter", ";"];

/// Error messages for each rule.
mod error_messages {
    pub const SELECT_ONLY: &str = "Only SELECT queries are allowed.";
    pub const FORBIDDEN_KEYWORD: &str = "Query contains a forbidden keyword";
    pub const INVALID_TABLE_NAME: &str = "Table name contains invalid characters.";
    pub const INVALID_PROCEDURE_NAME: &str = "Procedure name contains invalid characters.";
}

/// Validate free-form SQL for the `executeQuery` tool.
///
/// Returns the statement unchanged (not trimmed) when it passes.
///
/// # Examples
///
/// ```
/// use sybase_mcp_server::tools::sql_validator::validate_select;
///
/// assert!(validate_select("SELECT name FROM sysobjects").is_ok());
/// assert!(validate_select("DELETE FROM users").is_err());
/// assert!(validate_select("SELECT dropped_at FROM audit").is_err());
/// ```
pub fn validate_select(sql: &str) -> DbResult<Statement> {
    let folded = trim_text(sql).to_lowercase();

    if !folded.starts_with("select") {
        return Err(DbError::validation(error_messages::SELECT_ONLY));
    }

    if let Some(keyword) = find_forbidden_keyword(&folded) {
        return Err(DbError::validation(format!(
            "{}: {}",
            error_messages::FORBIDDEN_KEYWORD,
            keyword
        )));
    }

    Ok(Statement::new(sql))
}

/// First denylisted substring contained in already case-folded SQL.
fn find_forbidden_keyword(folded: &str) -> Option<&'static str> {
    FORBIDDEN_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| folded.contains(keyword))
}

/// Validate a table name before it is interpolated into catalog SQL.
///
/// Matches `^[A-Za-z0-9_]+$`.
pub fn validate_table_name(name: &str) -> DbResult<&str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(DbError::validation(error_messages::INVALID_TABLE_NAME))
    }
}

/// Validate a stored procedure name.
///
/// Accepts `proc`, `owner.proc` or `db.owner.proc`, where each part is made of
/// ASCII letters, digits, `_` or `#` (temporary procedures).
pub fn validate_procedure_name(name: &str) -> DbResult<&str> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 3
        && parts.iter().all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '#')
        });

    if valid {
        Ok(name)
    } else {
        Err(DbError::validation(error_messages::INVALID_PROCEDURE_NAME))
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

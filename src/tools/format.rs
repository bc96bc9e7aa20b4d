//! Output formatting for tool results.
//!
//! Every tool answers with a single text payload: the records as a compact
//! JSON array of objects on success, or `Error: <message>` on failure.

use crate::error::{DbError, DbResult};
use crate::models::Record;

/// Prefix of every error payload.
pub const ERROR_PREFIX: &str = "Error: ";

/// Encode records as a JSON array, keys in header order.
pub fn records_to_json(records: &[Record]) -> DbResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Text shown to the caller for a failed operation.
pub fn error_text(err: &DbError) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}

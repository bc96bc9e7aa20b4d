//! Query-related data models.
//!
//! This module defines the statement handed to the external client and the
//! record type produced from its output.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value as JsonValue;
use std::fmt;

/// One decoded result row: header field name to cell text, in header order.
pub type Record = serde_json::Map<String, JsonValue>;

/// A validated, fully assembled SQL statement.
///
/// Only the validator and the statement builders construct one, so holding a
/// `Statement` means the text already passed the safety rules. It is moved into
/// the executor and consumed by a single client invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
}

impl Statement {
    pub(crate) fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// The statement text.
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Base64 form passed to the client, so whitespace, quotes and newlines
    /// survive the argument boundary.
    pub fn encoded(&self) -> String {
        STANDARD.encode(self.sql.as_bytes())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_is_standard_base64() {
        let stmt = Statement::new("SELECT 'a b'\nFROM t");
        let decoded = STANDARD.decode(stmt.encoded()).unwrap();
        assert_eq!(decoded, stmt.as_str().as_bytes());
    }

    #[test]
    fn test_encoded_known_value() {
        assert_eq!(Statement::new("select 1").encoded(), "c2VsZWN0IDE=");
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut record = Record::new();
        record.insert("zeta".into(), JsonValue::String("1".into()));
        record.insert("alpha".into(), JsonValue::String("2".into()));
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}

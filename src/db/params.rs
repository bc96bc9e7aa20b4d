//! Stored procedure call building.
//!
//! The client has no bind-parameter mechanism, so procedure arguments are
//! rendered as SQL literals: numbers bare, everything else as a quoted string
//! with embedded single quotes doubled.

use crate::models::Statement;

/// Build `EXEC <name> <p1>, <p2>, ...`.
///
/// The procedure name is used as given; callers that want it checked run
/// [`crate::tools::sql_validator::validate_procedure_name`] first.
pub fn procedure_call(procedure_name: &str, params: &[String]) -> Statement {
    let mut sql = format!("EXEC {}", procedure_name);
    if !params.is_empty() {
        let literals: Vec<String> = params.iter().map(|p| to_literal(p)).collect();
        sql.push(' ');
        sql.push_str(&literals.join(", "));
    }
    Statement::new(sql)
}

/// Render one parameter as a SQL literal.
///
/// # Examples
///
/// ```
/// use sybase_mcp_server::db::params::to_literal;
///
/// assert_eq!(to_literal("42"), "42");
/// assert_eq!(to_literal("O'Brien"), "'O''Brien'");
/// ```
pub fn to_literal(param: &str) -> String {
    let trimmed = param.trim();
    if is_numeric(trimmed) {
        trimmed.to_string()
    } else {
        format!("'{}'", param.replace('\'', "''"))
    }
}

/// True for text that parses as a finite number ("42", "-1.5", "2e10").
///
/// `inf` and `NaN` parse as `f64` but are not finite, so they stay strings.
fn is_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_numeric_and_quoted_params() {
        let stmt = procedure_call("sp_test", &strings(&["42", "O'Brien"]));
        assert_eq!(stmt.as_str(), "EXEC sp_test 42, 'O''Brien'");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(procedure_call("sp_who", &[]).as_str(), "EXEC sp_who");
    }

    #[test]
    fn test_numeric_forms() {
        for value in ["0", "-7", "+3", "3.25", ".5", "1e3", "-2.5E-4"] {
            assert_eq!(to_literal(value), value);
        }
        assert_eq!(to_literal(" 12 "), "12");
    }

    #[test]
    fn test_non_finite_and_text_are_quoted() {
        assert_eq!(to_literal("inf"), "'inf'");
        assert_eq!(to_literal("NaN"), "'NaN'");
        assert_eq!(to_literal("12abc"), "'12abc'");
        assert_eq!(to_literal(""), "''");
        assert_eq!(to_literal("0x1F"), "'0x1F'");
    }

    #[test]
    fn test_quote_injection_is_neutralized() {
        let literal = to_literal("x'; DROP TABLE users --");
        assert_eq!(literal, "'x''; DROP TABLE users --'");
    }

    #[test]
    fn test_procedure_name_not_validated() {
        let stmt = procedure_call("dbo.sp_report", &strings(&["2024-01-01"]));
        assert_eq!(stmt.as_str(), "EXEC dbo.sp_report '2024-01-01'");
    }
}

//! Catalog introspection statements.
//!
//! Fixed queries against the Sybase system tables (`sysobjects`, `syscolumns`,
//! `systypes`, `sysusers`). Object type codes: `U` user table, `V` view,
//! `P` stored procedure.

use crate::error::DbResult;
use crate::models::Statement;
use crate::tools::sql_validator::validate_table_name;

/// Columns of a single user table: `column_name`, `data_type`, `length`.
///
/// The table name is matched exactly (case-sensitive) and is interpolated only
/// after passing [`validate_table_name`].
pub fn table_definition(table_name: &str) -> DbResult<Statement> {
    let table_name = validate_table_name(table_name)?;
    Ok(Statement::new(format!(
        "SELECT
            c.name AS column_name,
            t.name AS data_type,
            c.length
        FROM syscolumns c
        JOIN systypes t ON c.usertype = t.usertype
        JOIN sysobjects o ON c.id = o.id
        WHERE o.name = '{}' AND o.type = 'U'",
        table_name
    )))
}

/// All user tables with their owner: `owner`, `table_name`.
pub fn list_tables() -> Statement {
    Statement::new(
        "SELECT
            u.name AS owner,
            o.name AS table_name
        FROM sysobjects o
        JOIN sysusers u ON o.uid = u.uid
        WHERE o.type = 'U'
        ORDER BY owner, table_name",
    )
}

/// Every table, view and procedure with its columns.
///
/// Left joins keep views and procedures that have no `syscolumns` rows; their
/// column fields come back empty.
pub fn database_schema() -> Statement {
    Statement::new(
        "SELECT
            o.name AS object_name,
            o.type AS object_type,
            u.name AS owner_name,
            c.name AS column_name,
            t.name AS data_type,
            c.length AS column_length,
            c.prec AS precision,
            c.scale AS scale,
            c.status AS column_status
        FROM sysobjects o
        JOIN sysusers u ON o.uid = u.uid
        LEFT JOIN syscolumns c ON o.id = c.id
        LEFT JOIN systypes t ON c.usertype = t.usertype
        WHERE o.type IN ('U', 'V', 'P')
        ORDER BY object_type, object_name, column_name",
    )
}

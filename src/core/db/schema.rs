/// Schema Introspection Module
///
/// Reads table names and column metadata straight from SQLite's catalog.
/// Nothing here is cached; every call reflects the schema as it is now.

use crate::core::Result;
use rusqlite::{Connection, Row};

/// Represents a table column as declared in its schema
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type name (e.g., "INTEGER", "TEXT"); empty when undeclared
    pub type_name: String,
    /// Whether the column is declared NOT NULL
    pub notnull: bool,
    /// Whether this column is part of the primary key
    pub pk: bool,
    /// Default value expression (if any)
    pub dflt_value: Option<String>,
}

impl Column {
    /// Creates a Column from a table_info row (cid, name, type, notnull, dflt_value, pk)
    fn from_pragma_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Column {
            name: row.get(1)?,
            type_name: row.get(2)?,
            notnull: row.get(3)?,
            dflt_value: row.get(4)?,
            pk: row.get::<_, i64>(5)? > 0,
        })
    }
}

/// A table's name plus its columns in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableDescriptor {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Lists every table in `sqlite_master`, in catalog order.
///
/// Internal tables such as `sqlite_sequence` are included when present.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table'")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Describes a table's columns.
///
/// An unknown table yields a descriptor with no columns, matching SQLite's
/// own `table_info` behavior.
pub fn describe_table(conn: &Connection, table_name: &str) -> Result<TableDescriptor> {
    let mut stmt = conn.prepare(
        "SELECT cid, name, type, \"notnull\", dflt_value, pk
         FROM pragma_table_info(?1)
         ORDER BY cid",
    )?;
    let columns = stmt
        .query_map([table_name], |row| Column::from_pragma_row(row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(TableDescriptor {
        name: table_name.to_string(),
        columns,
    })
}

/// Column names of a table in declaration order
pub fn table_columns(conn: &Connection, table_name: &str) -> Result<Vec<String>> {
    Ok(describe_table(conn, table_name)?.column_names())
}

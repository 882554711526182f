/// Query Execution Module
///
/// This module runs SQL text against a connection and materializes the
/// complete result set. Row mappings and frames are both views over the same
/// `QueryResult`, so they always agree on row count and column order.

use crate::core::db::value::{Params, Row, Value};
use crate::core::Result;
use crate::frame::Frame;
use rusqlite::{params_from_iter, types::ToSql, Connection, Rows, Statement};
use std::sync::Arc;
use tracing::debug;

/// Represents the complete result of a SQL statement
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names in result-set order
    pub columns: Vec<String>,
    /// Row values, one inner vector per row, in engine order
    pub rows: Vec<Vec<Value>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// Converts the result into name-keyed rows sharing one column list
    pub fn into_rows(self) -> Vec<Row> {
        let columns: Arc<[String]> = self.columns.into();
        self.rows
            .into_iter()
            .map(|values| Row::new(Arc::clone(&columns), values))
            .collect()
    }

    pub fn into_frame(self) -> Frame {
        Frame::new(self.columns, self.rows)
    }
}

/// Query execution service that operates on a database connection
pub struct QueryExecutor<'a> {
    connection: &'a Connection,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new QueryExecutor for the given connection
    pub fn new(connection: &'a Connection) -> Self {
        QueryExecutor { connection }
    }

    /// Executes a SQL statement and collects every row it produces
    ///
    /// # Arguments
    ///
    /// * `sql` - The SQL text, passed to SQLite verbatim
    /// * `params` - Bindings for the statement's placeholders
    ///
    /// # Errors
    ///
    /// Returns `FifaStatError::Query` carrying SQLite's diagnostic when the
    /// statement cannot be prepared, a binding does not match, or stepping
    /// fails. No partial result is returned in that case.
    pub fn execute(&self, sql: &str, params: &Params) -> Result<QueryResult> {
        let mut stmt = self.connection.prepare(sql)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let rows = match params {
            Params::Positional(values) if !values.is_empty() => {
                stmt.query(params_from_iter(values.iter()))?
            }
            Params::Named(pairs) if !pairs.is_empty() => {
                check_named_params(&stmt, pairs)?;
                let named: Vec<(&str, &dyn ToSql)> = pairs
                    .iter()
                    .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
                    .collect();
                stmt.query(named.as_slice())?
            }
            _ => stmt.query([])?,
        };

        let rows = collect_rows(rows, column_count)?;
        debug!(rows = rows.len(), columns = column_count, "executed query: {}", sql);

        Ok(QueryResult::new(columns, rows))
    }

    /// Executes a statement and returns its rows as name-keyed records
    pub fn query_rows(&self, sql: &str, params: &Params) -> Result<Vec<Row>> {
        Ok(self.execute(sql, params)?.into_rows())
    }

    /// Executes a statement and returns its result as a frame
    pub fn query_frame(&self, sql: &str, params: &Params) -> Result<Frame> {
        Ok(self.execute(sql, params)?.into_frame())
    }
}

/// Every placeholder must receive exactly one named value; SQLite would
/// otherwise bind the missing ones as NULL.
fn check_named_params(stmt: &Statement<'_>, pairs: &[(String, Value)]) -> rusqlite::Result<()> {
    let expected = stmt.parameter_count();
    if pairs.len() != expected {
        return Err(rusqlite::Error::InvalidParameterCount(pairs.len(), expected));
    }
    for index in 1..=expected {
        match stmt.parameter_name(index) {
            Some(name) if pairs.iter().any(|(n, _)| n == name) => {}
            Some(name) => return Err(rusqlite::Error::InvalidParameterName(name.to_string())),
            None => return Err(rusqlite::Error::InvalidParameterName(format!("?{}", index))),
        }
    }
    Ok(())
}

fn collect_rows(mut rows: Rows<'_>, column_count: usize) -> rusqlite::Result<Vec<Vec<Value>>> {
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(Value::from(row.get_ref(i)?));
        }
        collected.push(values);
    }
    Ok(collected)
}

/// Quotes a name for use as an SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

//! Frame Module for FifaStat
//!
//! A `Frame` is an in-memory table: an ordered list of rows sharing one column
//! schema. It is what the accessor hands back for bulk analysis, with a text
//! rendering for previews and CSV/JSON/Markdown export.

use crate::core::db::value::{Row, Value};
use crate::core::{FifaStatError, Result};
use std::fmt;
use std::sync::Arc;

/// Storage class inferred for a frame column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every value is NULL (or the frame is empty)
    Null,
    Integer,
    Real,
    Text,
    Blob,
    /// Values of incompatible classes
    Mixed,
}

impl ColumnType {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => ColumnType::Null,
            Value::Integer(_) => ColumnType::Integer,
            Value::Real(_) => ColumnType::Real,
            Value::Text(_) => ColumnType::Text,
            Value::Blob(_) => ColumnType::Blob,
        }
    }

    fn merge(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (Null, t) | (t, Null) => t,
            (a, b) if a == b => a,
            (Integer, Real) | (Real, Integer) => Real,
            _ => Mixed,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Null => "null",
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
            ColumnType::Blob => "blob",
            ColumnType::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Represents a complete result set as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Arc<[String]>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Creates a frame from column names and row values
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Frame {
            columns: columns.into(),
            rows,
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of the named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        self.rows
            .get(index)
            .map(|values| Row::new(Arc::clone(&self.columns), values.clone()))
    }

    /// All rows as name-keyed records, in frame order
    pub fn rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|values| Row::new(Arc::clone(&self.columns), values.clone()))
            .collect()
    }

    /// The first `n` rows (all of them if the frame is shorter)
    pub fn head(&self, n: usize) -> Frame {
        Frame {
            columns: Arc::clone(&self.columns),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Per-column storage class inferred from the values present
    pub fn dtypes(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let dtype = self
                    .rows
                    .iter()
                    .map(|row| ColumnType::of(&row[i]))
                    .fold(ColumnType::Null, ColumnType::merge);
                (name.clone(), dtype)
            })
            .collect()
    }

    /// Renders the frame as a plain-text grid with a header line.
    pub fn render(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect();

        let pad_line = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{:<width$}", v, width = *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut output = String::new();
        output.push_str(&pad_line(&self.columns[..]));
        output.push('\n');
        let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&underline.join("-+-"));
        output.push('\n');
        for row in &cells {
            output.push_str(&pad_line(&row[..]));
            output.push('\n');
        }
        output
    }

    /// Exports the frame to a specified format.
    /// Supported formats: CSV, JSON, Markdown.
    pub fn export(&self, format: &str) -> Result<String> {
        match format.to_lowercase().as_str() {
            "csv" => Ok(self.export_to_csv()),
            "json" => self.export_to_json(),
            "markdown" => Ok(self.export_to_markdown()),
            _ => Err(FifaStatError::Format(format!(
                "Unsupported export format: '{}'. Supported formats: csv, json, markdown",
                format
            ))),
        }
    }

    fn export_to_csv(&self) -> String {
        let mut output = String::new();
        let header: Vec<String> = self.columns.iter().map(|c| csv_field(c)).collect();
        output.push_str(&header.join(","));
        output.push('\n');
        for row in &self.rows {
            let fields: Vec<String> = row
                .iter()
                .map(|value| match value {
                    Value::Null => String::new(),
                    other => csv_field(&other.to_string()),
                })
                .collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }
        output
    }

    fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows())?)
    }

    fn export_to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.columns.join(" | "));
        output.push('\n');
        let underline: Vec<String> = self.columns.iter().map(|h| "-".repeat(h.len().max(3))).collect();
        output.push_str(&underline.join(" | "));
        output.push('\n');
        for row in &self.rows {
            let row_content: Vec<String> = row
                .iter()
                .map(|value| value.to_string().replace('|', "\\|"))
                .collect();
            output.push_str(&row_content.join(" | "));
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())?;
        write!(f, "[{} rows x {} columns]", self.height(), self.width())
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

//! Dataset overview printed by the `fifastat` binary.

use crate::config::PreviewConfig;
use crate::core::db::{quote_identifier, Database, Params};
use crate::core::{FifaStatError, Result};
use crate::frame::Frame;
use std::io::Write;
use tracing::debug;

/// Writes a summary of `db` to `out`: the table list, a sample of the first
/// table's rows as JSON objects, and the head of the preview table taken from
/// a full export.
pub fn write_report<W: Write>(db: &Database, preview: &PreviewConfig, out: &mut W) -> Result<()> {
    let tables = db.list_tables()?;
    writeln!(out, "Tables in the database: {:?}", tables)?;
    writeln!(out, "Number of tables: {}", tables.len())?;

    if let Some(first) = tables.first() {
        let sql = format!("SELECT * FROM {} LIMIT ?", quote_identifier(first));
        let limit = i64::try_from(preview.rows).map_err(|_| {
            FifaStatError::Config(format!("preview rows out of range: {}", preview.rows))
        })?;
        let rows = db.execute_query(&sql, &Params::positional([limit]))?;
        for row in &rows {
            writeln!(out, "{}", serde_json::to_string(row)?)?;
        }
    }

    let frames = db.export_all_tables()?;
    debug!("Exported {} tables", frames.len());

    writeln!(out, "{} head data:", preview.table)?;
    match frames.get(&preview.table) {
        Some(frame) => {
            let head = frame.head(preview.rows);
            writeln!(out, "{}", format_frame(&head, &preview.format)?)?;
        }
        None => writeln!(out, "{} table not found", preview.table)?,
    }
    Ok(())
}

fn format_frame(frame: &Frame, format: &str) -> Result<String> {
    if format.eq_ignore_ascii_case("grid") {
        Ok(frame.to_string())
    } else {
        frame.export(format)
    }
}

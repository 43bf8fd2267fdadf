use super::{Cell, MISSING, ReportBook, Table};
use crate::Result;
use chrono::{DateTime, Local};
use core::fmt::Write;
use indexmap::IndexMap;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Serialize, Deserialize)]
struct JsonReport {
    generated_at: String,
    tables: IndexMap<String, JsonTable>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonTable {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

pub fn generate<W: Write>(book: &ReportBook, timestamp: DateTime<Local>, writer: &mut W) -> Result<()> {
    let report = JsonReport {
        generated_at: timestamp.to_rfc3339(),
        tables: book
            .iter()
            .map(|(name, table)| (name.to_string(), to_json_table(table)))
            .collect(),
    };

    write!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

/// Fold `book` into a previously written JSON report, replacing same-named tables and keeping the others.
///
/// # Errors
///
/// Returns an error if `existing` is not a report written by [`generate`].
pub fn merge_into_existing(existing: &str, book: &ReportBook) -> Result<ReportBook> {
    let report: JsonReport = serde_json::from_str(existing).into_app_err("parsing existing JSON report")?;

    let mut merged = ReportBook::new();
    for (name, table) in report.tables {
        let _ = merged.insert(name, from_json_table(table)?);
    }

    for (name, table) in book.iter() {
        let _ = merged.insert(name, table.clone());
    }

    Ok(merged)
}

fn to_json_table(table: &Table) -> JsonTable {
    JsonTable {
        header: table.header().to_vec(),
        rows: table.rows().iter().map(|row| row.iter().map(cell_to_json).collect()).collect(),
    }
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Integer(i) => Value::Number((*i).into()),
        Cell::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        Cell::Missing => Value::String(MISSING.to_string()),
    }
}

fn from_json_table(table: JsonTable) -> Result<Table> {
    let mut result = Table::new(table.header);
    for row in table.rows {
        result.push_row(row.into_iter().map(cell_from_json).collect())?;
    }
    Ok(result)
}

fn cell_from_json(value: Value) -> Cell {
    match value {
        Value::String(s) if s == MISSING => Cell::Missing,
        Value::String(s) => Cell::Text(s),
        Value::Number(n) => n.as_u64().map_or_else(|| n.as_f64().map_or(Cell::Missing, Cell::Number), Cell::Integer),
        Value::Null => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

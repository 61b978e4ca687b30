//! Export - Serializes pipeline output tables for the visualization sink
//!
//! The sink is external; this module only hands it consumable shapes: CSV
//! text, JSON records, and a bounded plain-text preview for logs.

use crate::error::{PipelineError, Result};
use crate::table::{Table, Value};
use itertools::Itertools;
use serde_json::{json, Map};

/// Render a table as CSV text. Missing values become empty cells.
pub fn to_csv(table: &Table) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.column_names())?;
    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        wtr.write_record(&record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| PipelineError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PipelineError::Export(e.to_string()))
}

/// Render a table as an array of JSON objects, one per row.
pub fn to_json_records(table: &Table) -> serde_json::Value {
    let mut records = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        let mut obj = Map::new();
        for column in table.columns() {
            obj.insert(column.name.clone(), cell_to_json(&column.values[row]));
        }
        records.push(serde_json::Value::Object(obj));
    }
    serde_json::Value::Array(records)
}

fn cell_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Int(i) => json!(i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => json!(s),
    }
}

/// Plain-text preview of the first `limit` rows, for logs and CLI output.
pub fn preview(table: &Table, limit: usize) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} ({} rows)",
        table.name,
        table.n_rows()
    ));
    lines.push(table.column_names().iter().join(" | "));
    for row in 0..table.n_rows().min(limit) {
        lines.push(
            table
                .columns()
                .iter()
                .map(|c| c.values[row].to_string())
                .join(" | "),
        );
    }
    if table.n_rows() > limit {
        lines.push(format!("... {} more rows", table.n_rows() - limit));
    }
    lines.join("\n")
}

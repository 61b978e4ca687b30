//! CSV Connector - Reads delimited text into a Table

use crate::error::{PipelineError, Result};
use crate::table::{Table, Value};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

/// Load a CSV file into a table named after the caller's dataset.
pub fn read_csv_path(path: &Path, table_name: &str) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Ingestion(format!("failed to read {}: {}", path.display(), e))
    })?;
    let table = read_csv_str(&text, table_name)?;
    info!(
        "loaded '{}' from {}: {} rows, {} columns",
        table_name,
        path.display(),
        table.n_rows(),
        table.n_columns()
    );
    Ok(table)
}

/// Parse raw CSV text into a table.
///
/// The first record is the header row; header names are trimmed. Records may
/// be shorter than the header; missing trailing cells become `Null`.
pub fn read_csv_str(text: &str, table_name: &str) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("");
            column.push(coerce_cell(cell));
        }
    }

    let mut table = Table::new(table_name);
    for (header, values) in headers.into_iter().zip(columns) {
        table.push_column(header, values)?;
    }
    Ok(table)
}

/// Coerce one cell to the narrowest value type: empty -> null, then integer,
/// then float, otherwise trimmed string.
fn coerce_cell(s: &str) -> Value {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }

    Value::Str(trimmed.to_string())
}

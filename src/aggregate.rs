//! Aggregator - Grouped reductions over a table
//!
//! Groups a table by one column and computes named reductions per group.
//! Groups appear in order of first appearance of each distinct group value;
//! any presentation sort is a downstream concern.

use crate::error::Result;
use crate::key::{normalize, KeyValue};
use crate::table::{Table, Value};
use std::collections::HashMap;
use tracing::debug;

/// A reduction operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    /// Sum of non-missing numeric values. Stays integer when every input is.
    Sum,
    /// Mean of non-missing numeric values; `Null` when a group has none.
    Mean,
    /// Count of non-missing values in the target column.
    Count,
    /// Count of rows in the group, missing or not. Needs no target column.
    RowCount,
}

/// A named reduction over a target column.
#[derive(Clone, Debug)]
pub struct AggSpec {
    pub reduction: Reduction,
    pub column: Option<String>,
    pub output: String,
}

impl AggSpec {
    pub fn sum(column: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            reduction: Reduction::Sum,
            column: Some(column.into()),
            output: output.into(),
        }
    }

    pub fn mean(column: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            reduction: Reduction::Mean,
            column: Some(column.into()),
            output: output.into(),
        }
    }

    pub fn count(column: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            reduction: Reduction::Count,
            column: Some(column.into()),
            output: output.into(),
        }
    }

    pub fn row_count(output: impl Into<String>) -> Self {
        Self {
            reduction: Reduction::RowCount,
            column: None,
            output: output.into(),
        }
    }
}

/// Group `table` by `group_column` and compute one output column per spec.
///
/// Rows whose group value is missing are excluded from grouping. Referencing
/// a grouping or target column that does not exist fails with
/// `SchemaMismatch`.
pub fn group_by(table: &Table, group_column: &str, specs: &[AggSpec]) -> Result<Table> {
    let group_values = table.require_column(group_column)?;
    for spec in specs {
        if let Some(column) = &spec.column {
            table.require_column(column)?;
        }
    }

    // Groups keyed by normalized value, in order of first appearance.
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<usize>)> = Vec::new();
    for (row, value) in group_values.values.iter().enumerate() {
        match normalize(value) {
            KeyValue::Present(key) => {
                let slot = *group_index.entry(key).or_insert_with(|| {
                    groups.push((value.clone(), Vec::new()));
                    groups.len() - 1
                });
                groups[slot].1.push(row);
            }
            KeyValue::Absent => {}
        }
    }

    debug!(
        "group '{}' by '{}': {} rows -> {} groups",
        table.name,
        group_column,
        table.n_rows(),
        groups.len()
    );

    let mut summary = Table::new(format!("{}_by_{}", table.name, group_column));
    summary.push_column(
        group_column.to_string(),
        groups.iter().map(|(v, _)| v.clone()).collect(),
    )?;
    for spec in specs {
        let target = spec.column.as_deref().map(|c| table.require_column(c)).transpose()?;
        let values = groups
            .iter()
            .map(|(_, rows)| match target {
                Some(column) => reduce(spec.reduction, column.values.as_slice(), rows),
                None => Value::Int(rows.len() as i64),
            })
            .collect();
        summary.push_column(spec.output.clone(), values)?;
    }
    Ok(summary)
}

/// Apply one reduction to the target values of a group's rows.
///
/// Missing values are skipped; non-numeric values under `Sum`/`Mean` are
/// skipped the same way.
fn reduce(reduction: Reduction, values: &[Value], rows: &[usize]) -> Value {
    match reduction {
        Reduction::Sum => {
            let mut total = 0.0;
            let mut all_int = true;
            for &row in rows {
                match &values[row] {
                    Value::Int(i) => total += *i as f64,
                    Value::Float(f) => {
                        total += f;
                        all_int = false;
                    }
                    _ => {}
                }
            }
            if all_int {
                Value::Int(total as i64)
            } else {
                Value::Float(total)
            }
        }
        Reduction::Mean => {
            let mut total = 0.0;
            let mut count = 0usize;
            for &row in rows {
                if let Some(x) = values[row].as_f64() {
                    total += x;
                    count += 1;
                }
            }
            if count == 0 {
                Value::Null
            } else {
                Value::Float(total / count as f64)
            }
        }
        Reduction::Count => {
            Value::Int(rows.iter().filter(|&&row| !values[row].is_null()).count() as i64)
        }
        Reduction::RowCount => Value::Int(rows.len() as i64),
    }
}

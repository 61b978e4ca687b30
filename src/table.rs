//! Table - In-memory columnar tables shared by every pipeline stage
//!
//! A `Table` is an ordered sequence of named, equal-length columns. Tables are
//! built once (by the CSV connector or by a pipeline stage) and never mutated
//! afterwards; every stage takes tables by reference and returns new ones.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of a table: numeric (integer or float), string, or missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A named column of values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// A named table of equal-length columns.
///
/// Invariants enforced at construction: no two columns share a name, and every
/// column has the same length as the first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Build a table from (name, values) pairs, validating the invariants.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(String, Vec<Value>)>,
    ) -> Result<Self> {
        let mut table = Table::new(name);
        for (col_name, values) in columns {
            table.push_column(col_name, values)?;
        }
        Ok(table)
    }

    /// Append a column, rejecting duplicate names and ragged lengths.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(PipelineError::Shape(format!(
                "duplicate column '{}' in table '{}'",
                name, self.name
            )));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(PipelineError::Shape(format!(
                "column '{}' has {} rows, table '{}' has {}",
                name,
                values.len(),
                self.name,
                self.n_rows()
            )));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Look up a column, failing with the table identity in the error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| PipelineError::schema_mismatch(name, &self.name))
    }

    pub fn value(&self, column: &str, row: usize) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_valid() {
        let table = Table::from_columns(
            "health",
            vec![
                ("country".to_string(), vec![Value::Str("US".to_string())]),
                ("age".to_string(), vec![Value::Int(60)]),
            ],
        )
        .unwrap();

        assert_eq!(table.n_rows(), 1);
        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.column_names(), vec!["country", "age"]);
        assert_eq!(table.value("age", 0), Some(&Value::Int(60)));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = Table::new("t");
        table.push_column("a", vec![Value::Int(1)]).unwrap();
        let err = table.push_column("a", vec![Value::Int(2)]).unwrap_err();
        assert!(err.to_string().contains("duplicate column 'a'"));
    }

    #[test]
    fn test_ragged_lengths_rejected() {
        let mut table = Table::new("t");
        table.push_column("a", vec![Value::Int(1), Value::Int(2)]).unwrap();
        let err = table.push_column("b", vec![Value::Int(1)]).unwrap_err();
        assert!(err.to_string().contains("has 1 rows"));
    }

    #[test]
    fn test_require_column_missing() {
        let table = Table::new("env");
        let err = table.require_column("pm25").unwrap_err();
        assert!(err.to_string().contains("'pm25'"));
        assert!(err.to_string().contains("'env'"));
    }

    #[test]
    fn test_empty_table_has_zero_rows() {
        let mut table = Table::new("t");
        table.push_column("a", vec![]).unwrap();
        table.push_column("b", vec![]).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_columns(), 2);
    }
}

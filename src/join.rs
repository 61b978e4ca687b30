//! Join Engine - Inner join of two tables on normalized keys
//!
//! Hash join: index the right table's key column (normalized key -> row
//! positions in input order), then walk the left table's rows in input order
//! and emit one output row per match. Output order is therefore deterministic:
//! left input order first, right input order within a key group.

use crate::error::Result;
use crate::key::{normalize, KeyValue};
use crate::table::Table;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Compute the inner join of `left` and `right` on the designated key columns.
///
/// A key appearing L times on the left and R times on the right contributes
/// L*R output rows; the fan-out is intentional and never deduplicated. Rows
/// with an absent key on either side never match. Columns present on both
/// sides are kept under `<name>_left` / `<name>_right` so no data is silently
/// dropped. A join with zero matches is a valid empty table carrying the full
/// merged schema.
pub fn inner_join(
    left: &Table,
    right: &Table,
    left_key: &str,
    right_key: &str,
    name: impl Into<String>,
) -> Result<Table> {
    let left_keys = left.require_column(left_key)?;
    let right_keys = right.require_column(right_key)?;

    // Index: normalized key -> right-row positions in input order.
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (pos, value) in right_keys.values.iter().enumerate() {
        if let KeyValue::Present(key) = normalize(value) {
            index.entry(key).or_default().push(pos);
        }
    }

    // Matched (left row, right row) pairs in output order.
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (left_pos, value) in left_keys.values.iter().enumerate() {
        if let KeyValue::Present(key) = normalize(value) {
            if let Some(right_rows) = index.get(&key) {
                for &right_pos in right_rows {
                    pairs.push((left_pos, right_pos));
                }
            }
        }
    }

    debug!(
        "inner join '{}' x '{}' on {}={}: {} x {} rows -> {} rows",
        left.name,
        right.name,
        left_key,
        right_key,
        left.n_rows(),
        right.n_rows(),
        pairs.len()
    );

    let left_names: HashSet<&str> = left.column_names().into_iter().collect();
    let right_names: HashSet<&str> = right.column_names().into_iter().collect();

    let mut merged = Table::new(name);
    for column in left.columns() {
        let out_name = if right_names.contains(column.name.as_str()) {
            format!("{}_left", column.name)
        } else {
            column.name.clone()
        };
        let values = pairs.iter().map(|&(l, _)| column.values[l].clone()).collect();
        merged.push_column(out_name, values)?;
    }
    for column in right.columns() {
        let out_name = if left_names.contains(column.name.as_str()) {
            format!("{}_right", column.name)
        } else {
            column.name.clone()
        };
        let values = pairs.iter().map(|&(_, r)| column.values[r].clone()).collect();
        merged.push_column(out_name, values)?;
    }
    Ok(merged)
}

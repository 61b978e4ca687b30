//! Column Resolver - Locates semantic columns by heuristic name matching
//!
//! The two source datasets are maintained by different parties, so column
//! names drift: one file says `Country`, the other `Country_Name`. Rather than
//! binding to a fixed schema, each semantic role the pipeline needs is a
//! `Concept` with a matching token, and resolution scans the table's columns
//! in declared order for the first name that contains the token
//! (case-insensitively). First match wins; no fuzzy scoring.

use crate::error::{PipelineError, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic role a column must play, with its matching token.
///
/// The token table is the single place the matching heuristic lives; every
/// stage that needs a column goes through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// Join key shared by both datasets.
    Country,
    /// Lung cancer diagnosis flag (health table).
    LungCancer,
    /// Patient age (health table).
    Age,
    /// Patient gender (health table).
    Gender,
    /// PM2.5 measurement (environmental table).
    Pm25,
    /// AQI category label (environmental table).
    AqiCategory,
}

impl Concept {
    /// Lowercase token matched as a substring against lowercased column names.
    ///
    /// The `aqi.category` token contains a literal dot: a column named
    /// `AQI.Category` matches, `AQI Category` does not. This mirrors the
    /// naming convention of the environmental source files.
    pub fn token(&self) -> &'static str {
        match self {
            Concept::Country => "country",
            Concept::LungCancer => "lung_cancer",
            Concept::Age => "age",
            Concept::Gender => "gender",
            Concept::Pm25 => "pm2.5",
            Concept::AqiCategory => "aqi.category",
        }
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Concept::Country => "country",
            Concept::LungCancer => "lung cancer diagnosis",
            Concept::Age => "age",
            Concept::Gender => "gender",
            Concept::Pm25 => "PM2.5 measurement",
            Concept::AqiCategory => "AQI category",
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A resolved (table, column) pair; the column is guaranteed to exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

/// Resolve a concept against a table.
///
/// Scans columns in declared order and returns the first whose lowercased
/// name contains the concept's token. Fails with `SchemaMismatch` naming the
/// concept and the table when nothing qualifies.
pub fn resolve_column(table: &Table, concept: Concept) -> Result<ColumnRef> {
    let token = concept.token();
    table
        .columns()
        .iter()
        .find(|c| c.name.to_lowercase().contains(token))
        .map(|c| ColumnRef {
            table: table.name.clone(),
            column: c.name.clone(),
        })
        .ok_or_else(|| PipelineError::schema_mismatch(concept.describe(), &table.name))
}

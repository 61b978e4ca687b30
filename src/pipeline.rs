//! Study Pipeline - Resolves, joins, and aggregates the two source datasets
//!
//! End-to-end flow: resolve the fixed concept vocabulary against both tables
//! (failing fast on schema drift), inner-join on the country columns, then
//! derive the per-country health summary and the AQI category distribution.
//! Every stage is a pure transformation over in-memory tables; a resolution
//! failure anywhere aborts the run with no partial output.

use crate::aggregate::{group_by, AggSpec};
use crate::error::Result;
use crate::join::inner_join;
use crate::resolver::{resolve_column, ColumnRef, Concept};
use crate::table::Table;
use tracing::info;

/// Columns resolved against the health-outcomes table.
#[derive(Clone, Debug)]
pub struct HealthColumns {
    pub country: ColumnRef,
    pub lung_cancer: ColumnRef,
    pub age: ColumnRef,
    pub gender: ColumnRef,
}

/// Columns resolved against the environmental-measurements table.
#[derive(Clone, Debug)]
pub struct AirColumns {
    pub country: ColumnRef,
    pub pm25: ColumnRef,
    pub aqi_category: ColumnRef,
}

/// Everything the visualization sink consumes.
///
/// The resolved column refs are included so the sink knows which merged
/// columns to plot without re-running the name heuristics.
#[derive(Clone, Debug)]
pub struct StudyOutput {
    pub merged: Table,
    pub country_stats: Table,
    pub aqi_distribution: Table,
    pub health_columns: HealthColumns,
    pub air_columns: AirColumns,
}

/// The batch pipeline over one pair of source tables.
pub struct StudyPipeline;

impl StudyPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the health-table concept vocabulary, failing on the first miss.
    pub fn resolve_health(table: &Table) -> Result<HealthColumns> {
        Ok(HealthColumns {
            country: resolve_column(table, Concept::Country)?,
            lung_cancer: resolve_column(table, Concept::LungCancer)?,
            age: resolve_column(table, Concept::Age)?,
            gender: resolve_column(table, Concept::Gender)?,
        })
    }

    /// Resolve the environmental-table concept vocabulary.
    pub fn resolve_air(table: &Table) -> Result<AirColumns> {
        Ok(AirColumns {
            country: resolve_column(table, Concept::Country)?,
            pm25: resolve_column(table, Concept::Pm25)?,
            aqi_category: resolve_column(table, Concept::AqiCategory)?,
        })
    }

    /// Run the full pipeline: resolve, join on country, aggregate.
    pub fn run(&self, health: &Table, air: &Table) -> Result<StudyOutput> {
        let health_columns = Self::resolve_health(health)?;
        let air_columns = Self::resolve_air(air)?;
        info!(
            "resolved join keys: {}.{} = {}.{}",
            health.name, health_columns.country.column, air.name, air_columns.country.column
        );

        let merged = inner_join(
            health,
            air,
            &health_columns.country.column,
            &air_columns.country.column,
            "merged",
        )?;
        info!("merged table: {} rows", merged.n_rows());

        let country_stats = group_by(
            health,
            &health_columns.country.column,
            &[
                AggSpec::sum(&health_columns.lung_cancer.column, "cancer_cases"),
                AggSpec::mean(&health_columns.age.column, "average_age"),
            ],
        )?;

        let aqi_distribution = group_by(
            air,
            &air_columns.aqi_category.column,
            &[AggSpec::row_count("frequency")],
        )?;

        Ok(StudyOutput {
            merged,
            country_stats,
            aqi_distribution,
            health_columns,
            air_columns,
        })
    }
}

impl Default for StudyPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn health_table() -> Table {
        Table::from_columns(
            "health",
            vec![
                (
                    "Country".to_string(),
                    vec![Value::Str("US".to_string()), Value::Str("US".to_string())],
                ),
                ("AGE".to_string(), vec![Value::Int(60), Value::Int(45)]),
                (
                    "GENDER".to_string(),
                    vec![Value::Str("M".to_string()), Value::Str("F".to_string())],
                ),
                ("LUNG_CANCER".to_string(), vec![Value::Int(1), Value::Int(0)]),
            ],
        )
        .unwrap()
    }

    fn air_table() -> Table {
        Table::from_columns(
            "air",
            vec![
                ("Country".to_string(), vec![Value::Str("US".to_string())]),
                ("PM2.5 AQI Value".to_string(), vec![Value::Int(80)]),
                (
                    "AQI.Category".to_string(),
                    vec![Value::Str("Moderate".to_string())],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_run_end_to_end() {
        let output = StudyPipeline::new().run(&health_table(), &air_table()).unwrap();

        // Both US health rows pick up the single US air row.
        assert_eq!(output.merged.n_rows(), 2);
        assert_eq!(output.merged.value("PM2.5 AQI Value", 0), Some(&Value::Int(80)));
        assert_eq!(output.merged.value("PM2.5 AQI Value", 1), Some(&Value::Int(80)));

        assert_eq!(output.country_stats.n_rows(), 1);
        assert_eq!(
            output.country_stats.value("Country", 0),
            Some(&Value::Str("US".to_string()))
        );
        assert_eq!(output.country_stats.value("cancer_cases", 0), Some(&Value::Int(1)));
        assert_eq!(
            output.country_stats.value("average_age", 0),
            Some(&Value::Float(52.5))
        );

        assert_eq!(output.aqi_distribution.n_rows(), 1);
        assert_eq!(output.aqi_distribution.value("frequency", 0), Some(&Value::Int(1)));
    }

    #[test]
    fn test_missing_gender_column_aborts_run() {
        let health = Table::from_columns(
            "health",
            vec![
                ("Country".to_string(), vec![Value::Str("US".to_string())]),
                ("AGE".to_string(), vec![Value::Int(60)]),
                ("sex".to_string(), vec![Value::Str("M".to_string())]),
                ("LUNG_CANCER".to_string(), vec![Value::Int(1)]),
            ],
        )
        .unwrap();

        let err = StudyPipeline::new().run(&health, &air_table()).unwrap_err();
        assert!(err.to_string().contains("gender"));
        assert!(err.to_string().contains("health"));
    }

    #[test]
    fn test_disjoint_countries_complete_with_empty_merge() {
        let mut health = health_table();
        health = Table::from_columns(
            "health",
            health
                .columns()
                .iter()
                .map(|c| {
                    let values = if c.name == "Country" {
                        vec![Value::Str("FR".to_string()), Value::Str("FR".to_string())]
                    } else {
                        c.values.clone()
                    };
                    (c.name.clone(), values)
                })
                .collect(),
        )
        .unwrap();

        let output = StudyPipeline::new().run(&health, &air_table()).unwrap();
        assert_eq!(output.merged.n_rows(), 0);
        // Summaries still materialize from their single-source tables.
        assert_eq!(output.country_stats.n_rows(), 1);
    }
}

//! Completeness, schema and type checks over a loaded batch

use std::fmt;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::{batch::Batch, config::PipelineConfig};

/// One problem found in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Column has empty or `null` cells
    MissingValues { column: String, count: usize },
    /// Required column absent from the batch
    MissingColumn { column: String },
    /// Sensor column holds values that are not numbers
    NonNumericColumn { column: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MissingValues { column, count } => {
                write!(f, "{count} missing values in column {column}")
            }
            Finding::MissingColumn { column } => write!(f, "missing required column {column}"),
            Finding::NonNumericColumn { column } => write!(f, "non-numeric sensor column {column}"),
        }
    }
}

/// Result of the three batch checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Missing-cell count for every batch column, in column order
    pub missing_counts: Vec<(String, usize)>,
    /// Required columns absent from the batch
    pub missing_columns: Vec<String>,
    /// Sensor columns that are not entirely numeric
    pub non_numeric_columns: Vec<String>,
}

impl ValidationReport {
    pub fn missing_count(&self, column: &str) -> usize {
        self.missing_counts
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn has_missing_values(&self) -> bool {
        self.missing_counts.iter().any(|(_, n)| *n > 0)
    }

    pub fn is_clean(&self) -> bool {
        !self.has_missing_values()
            && self.missing_columns.is_empty()
            && self.non_numeric_columns.is_empty()
    }

    pub fn findings(&self) -> Vec<Finding> {
        let missing_values = self
            .missing_counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(c, n)| Finding::MissingValues {
                column: c.clone(),
                count: *n,
            });
        let missing_columns = self
            .missing_columns
            .iter()
            .map(|c| Finding::MissingColumn { column: c.clone() });
        let non_numeric = self
            .non_numeric_columns
            .iter()
            .map(|c| Finding::NonNumericColumn { column: c.clone() });

        missing_values
            .chain(missing_columns)
            .chain(non_numeric)
            .collect()
    }

    /// Emit the three check outcomes on the log channel.
    pub fn log(&self) {
        if self.has_missing_values() {
            warn!("Missing values found in data!");
            for (column, count) in &self.missing_counts {
                warn!("  {column}: {count}");
            }
        } else {
            info!("No missing values found.");
        }

        if self.missing_columns.is_empty() {
            info!("All expected columns are present.");
        } else {
            error!("Missing columns: {:?}", self.missing_columns);
        }

        if self.non_numeric_columns.is_empty() {
            info!("All sensor columns are numeric.");
        } else {
            error!("Non-numeric sensor columns found: {:?}", self.non_numeric_columns);
        }
    }
}

/// Checks a batch against fixed required and sensor column sets
pub struct Validator {
    required_columns: Vec<String>,
    sensor_columns: Vec<String>,
}

impl Validator {
    pub fn new(required_columns: Vec<String>, sensor_columns: Vec<String>) -> Self {
        Self {
            required_columns,
            sensor_columns,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.required_columns.clone(),
            config.sensor_columns.clone(),
        )
    }

    /// Run all checks. Never short-circuits and never fails.
    pub fn validate(&self, batch: &Batch) -> ValidationReport {
        ValidationReport {
            missing_counts: self.check_completeness(batch),
            missing_columns: self.check_schema(batch),
            non_numeric_columns: self.check_types(batch),
        }
    }

    pub fn check_completeness(&self, batch: &Batch) -> Vec<(String, usize)> {
        batch
            .columns()
            .iter()
            .map(|name| {
                let count = batch
                    .column(name)
                    .map(|cells| cells.filter(|v| v.is_null()).count())
                    .unwrap_or(0);
                (name.clone(), count)
            })
            .collect()
    }

    /// Required columns absent from the batch. Extra columns are ignored.
    pub fn check_schema(&self, batch: &Batch) -> Vec<String> {
        self.required_columns
            .iter()
            .filter(|c| !batch.has_column(c))
            .cloned()
            .collect()
    }

    /// Sensor columns present in the batch whose non-missing cells are not
    /// all numbers. A column with no values at all counts as non-numeric.
    pub fn check_types(&self, batch: &Batch) -> Vec<String> {
        self.sensor_columns
            .iter()
            .filter(|name| match batch.column(name) {
                Some(cells) => !is_numeric_column(cells),
                None => false,
            })
            .cloned()
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

fn is_numeric_column<'a>(cells: impl Iterator<Item = &'a Value>) -> bool {
    let mut seen_number = false;
    for cell in cells {
        match cell {
            Value::Null => {}
            Value::Number(_) => seen_number = true,
            _ => return false,
        }
    }
    seen_number
}

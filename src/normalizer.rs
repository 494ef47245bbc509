//! Min-max normalization of the sensor columns

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    batch::{cell_text, render_table, Batch},
    config::TIMESTAMP_COLUMN,
    error::PreprocessError,
    scalers::MinMaxScaler,
};

/// Sensor columns scaled to [0, 1] with the timestamp re-attached last
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    sensor_columns: Vec<String>,
    /// Row-major scaled values, `None` where the input cell was missing
    values: Vec<Vec<Option<f64>>>,
    timestamps: Vec<Value>,
}

impl NormalizedBatch {
    pub fn sensor_columns(&self) -> &[String] {
        &self.sensor_columns
    }

    /// Output column order: sensors, then timestamp.
    pub fn header(&self) -> Vec<String> {
        self.sensor_columns
            .iter()
            .cloned()
            .chain(std::iter::once(TIMESTAMP_COLUMN.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[Value] {
        &self.timestamps
    }

    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.sensor_columns.iter().position(|c| c == name)?;
        Some(self.values.iter().map(|row| row[idx]).collect())
    }

    /// Each row's scaled values paired with its timestamp.
    pub fn rows(&self) -> impl Iterator<Item = (&[Option<f64>], &Value)> + '_ {
        self.values
            .iter()
            .map(|r| r.as_slice())
            .zip(self.timestamps.iter())
    }
}

impl fmt::Display for NormalizedBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows()
            .map(|(values, ts)| {
                values
                    .iter()
                    .map(|v| v.map(format_scaled).unwrap_or_else(|| "NaN".to_string()))
                    .chain(std::iter::once(match ts {
                        Value::Null => "NaN".to_string(),
                        other => cell_text(other),
                    }))
                    .collect()
            })
            .collect();
        render_table(f, &self.header(), &rows)
    }
}

/// Shortest round-trip text. Whole numbers keep a `.0`; very small values
/// use exponent form (`1e-7`).
pub(crate) fn format_scaled(value: f64) -> String {
    format!("{:?}", value)
}

/// Fit one scaler per sensor column over the whole batch and apply it.
///
/// Missing cells are skipped when fitting and stay missing. A present cell
/// that is not a number fails the whole run.
pub fn normalize(
    batch: &Batch,
    sensor_columns: &[String],
) -> Result<NormalizedBatch, PreprocessError> {
    let timestamps: Vec<Value> = batch
        .column(TIMESTAMP_COLUMN)
        .ok_or_else(|| PreprocessError::SchemaViolation {
            column: TIMESTAMP_COLUMN.to_string(),
        })?
        .cloned()
        .collect();

    let mut scaled_columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(sensor_columns.len());
    for name in sensor_columns {
        let raw = numeric_column(batch, name)?;
        let present: Vec<f64> = raw.iter().flatten().copied().collect();
        let scaler = MinMaxScaler::new(&present);

        if scaler.is_degenerate() && !present.is_empty() {
            warn!(
                "Column {} is constant ({}); scaling it to 0.0",
                name,
                scaler.min()
            );
        }
        debug!(
            "Fitted {}: min={} max={} over {} values",
            name,
            scaler.min(),
            scaler.max(),
            present.len()
        );

        scaled_columns.push(
            raw.into_iter()
                .map(|v| v.map(|v| scaler.transform(v)))
                .collect(),
        );
    }

    let values = (0..batch.len())
        .map(|row| scaled_columns.iter().map(|col| col[row]).collect())
        .collect();

    Ok(NormalizedBatch {
        sensor_columns: sensor_columns.to_vec(),
        values,
        timestamps,
    })
}

fn numeric_column(batch: &Batch, name: &str) -> Result<Vec<Option<f64>>, PreprocessError> {
    let cells = batch
        .column(name)
        .ok_or_else(|| PreprocessError::SchemaViolation {
            column: name.to_string(),
        })?;

    cells
        .enumerate()
        .map(|(row, cell)| match cell {
            Value::Null => Ok(None),
            Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| {
                PreprocessError::NumericConversion {
                    column: name.to_string(),
                    row,
                    value: n.to_string(),
                }
            }),
            other => Err(PreprocessError::NumericConversion {
                column: name.to_string(),
                row,
                value: other.to_string(),
            }),
        })
        .collect()
}

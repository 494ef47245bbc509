//! Pipeline Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised by the loader, normalizer and writer stages
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Input file missing, unreadable or not an array of records
    #[error("Cannot load sensor data from {path}: {reason}")]
    DataSource { path: PathBuf, reason: String },

    /// A column the normalizer needs is not in the batch
    #[error("Required column missing from batch: {column}")]
    SchemaViolation { column: String },

    /// A sensor cell holds something other than a number
    #[error("Non-numeric value {value} in column {column} at row {row}")]
    NumericConversion {
        column: String,
        row: usize,
        value: String,
    },

    /// Output destination not writable
    #[error("Cannot write normalized data to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl PreprocessError {
    pub(crate) fn data_source(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataSource {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

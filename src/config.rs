//! Pipeline configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const TIMESTAMP_COLUMN: &str = "timestamp";

pub const SENSOR_COLUMNS: [&str; 6] = ["acc_x", "acc_y", "acc_z", "gyro_x", "gyro_y", "gyro_z"];

/// Fixed paths and column sets for one preprocessing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// JSON array of sensor records
    pub input_path: PathBuf,
    /// Destination of the normalized CSV
    pub output_path: PathBuf,
    /// Columns the schema check expects
    pub required_columns: Vec<String>,
    /// Columns rescaled to [0, 1]
    pub sensor_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let sensor_columns: Vec<String> = SENSOR_COLUMNS.iter().map(|c| c.to_string()).collect();
        let required_columns = std::iter::once(TIMESTAMP_COLUMN.to_string())
            .chain(sensor_columns.iter().cloned())
            .collect();
        Self {
            input_path: PathBuf::from("test_data.json"),
            output_path: PathBuf::from("normalized_data.csv"),
            required_columns,
            sensor_columns,
        }
    }
}

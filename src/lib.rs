//! Motion Sensor Preprocessing
//!
//! Loads accelerometer/gyroscope samples from JSON, checks them, min-max
//! scales the six sensor channels and writes the result as CSV.

pub mod batch;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod scalers;
pub mod validator;
pub mod writer;

pub use batch::{load_batch, Batch};
pub use config::{PipelineConfig, SENSOR_COLUMNS, TIMESTAMP_COLUMN};
pub use error::PreprocessError;
pub use normalizer::{normalize, NormalizedBatch};
pub use pipeline::{run, PipelineOutput};
pub use validator::{Finding, ValidationReport, Validator};
pub use writer::{to_csv_bytes, write_csv};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global log subscriber.
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

//! Load, validate, normalize, write

use tracing::{debug, info, warn};

use crate::{
    batch::load_batch,
    config::PipelineConfig,
    error::PreprocessError,
    normalizer::{normalize, NormalizedBatch},
    validator::{ValidationReport, Validator},
    writer::write_csv,
};

/// What a completed run produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub report: ValidationReport,
    pub normalized: NormalizedBatch,
}

/// Run all four stages once.
///
/// Validation findings are logged and the run carries on; loader,
/// normalizer and writer errors end it before anything is written.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput, PreprocessError> {
    if let Ok(json) = serde_json::to_string(config) {
        debug!("Pipeline config: {}", json);
    }
    let batch = load_batch(&config.input_path)?;
    info!("Raw sensor data:\n{}", batch);

    info!("Validating data...");
    let report = Validator::from_config(config).validate(&batch);
    report.log();
    if !report.is_clean() {
        warn!(
            "Continuing with {} validation finding(s)",
            report.findings().len()
        );
    }

    info!("Normalizing sensor data...");
    let normalized = normalize(&batch, &config.sensor_columns)?;
    info!("Normalized sensor data:\n{}", normalized);

    write_csv(&normalized, &config.output_path)?;

    Ok(PipelineOutput { report, normalized })
}

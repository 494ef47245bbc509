use std::time::Instant;

use motion_sensor_preprocess::{init_logging, run, PipelineConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let now = Instant::now();
    let config = PipelineConfig::default();

    let output = run(&config)?;

    info!(
        "Processed {} samples into {}",
        output.normalized.len(),
        config.output_path.display()
    );
    let elapsed = now.elapsed();
    info!("Elapsed: {:.2?}", elapsed);
    Ok(())
}

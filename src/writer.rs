//! CSV output of the normalized batch

use std::{fs, path::Path};

use tracing::info;

use crate::{
    batch::cell_text,
    error::PreprocessError,
    normalizer::{format_scaled, NormalizedBatch},
};

/// Render the header and one record per sample, no index column.
pub fn to_csv_bytes(normalized: &NormalizedBatch) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(normalized.header())?;

    for (values, timestamp) in normalized.rows() {
        let record = values
            .iter()
            .map(|v| v.map(format_scaled).unwrap_or_default())
            .chain(std::iter::once(cell_text(timestamp)));
        wtr.write_record(record)?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Write the whole file in one go so a failure leaves nothing half written.
pub fn write_csv(
    normalized: &NormalizedBatch,
    path: impl AsRef<Path>,
) -> Result<(), PreprocessError> {
    let path = path.as_ref();
    let bytes = to_csv_bytes(normalized).map_err(|e| PreprocessError::write(path, e))?;
    fs::write(path, bytes).map_err(|e| PreprocessError::write(path, e))?;

    info!("Normalized data saved to {}", path.display());
    Ok(())
}

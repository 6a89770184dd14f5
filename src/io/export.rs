//! Export the filtered rows to CSV.
//!
//! The export mirrors the dashboard's data table and is meant to be easy to
//! consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use crate::domain::Record;
use crate::error::AppError;

/// Write rows to a CSV file with a `Product,Region,Month,...` header.
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut writer = csv::Writer::from_writer(file);
    if records.is_empty() {
        // serde only emits the header alongside the first row.
        writer
            .write_record(["Product", "Region", "Month", "SalesAmount", "UnitsSold", "Target"])
            .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;
    }
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

//! Read/write aggregation snapshot JSON files.
//!
//! A snapshot is the portable form of one dashboard view:
//! - the selection that produced it
//! - the full aggregation result (rows, totals, groupings)
//! - when and from which sample it was generated
//!
//! `dash show` re-renders a saved snapshot without rebuilding the dataset.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AggregationResult, FilterSelection};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub sample_seed: u64,
    pub sample_count: usize,
    pub selection: FilterSelection,
    pub result: AggregationResult,
}

impl SnapshotFile {
    pub fn new(
        selection: &FilterSelection,
        result: &AggregationResult,
        sample_seed: u64,
        sample_count: usize,
    ) -> Self {
        Self {
            tool: "dash".to_string(),
            generated_at: Utc::now(),
            sample_seed,
            sample_count,
            selection: selection.clone(),
            result: result.clone(),
        }
    }
}

pub fn write_snapshot_json(path: &Path, snapshot: &SnapshotFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::io(format!("Failed to write snapshot JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote JSON snapshot");
    Ok(())
}

pub fn read_snapshot_json(path: &Path) -> Result<SnapshotFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: SnapshotFile = serde_json::from_reader(file)
        .map_err(|e| AppError::invalid_argument(format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

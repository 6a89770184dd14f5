//! Shared dashboard pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! sample generation -> dataset -> initial selection -> aggregation
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::{Dataset, SampleConfig, generate_sample};
use crate::domain::{AggregationResult, DashConfig, FilterSelection, Vocabulary};
use crate::engine::{aggregate, default_selection};
use crate::error::AppError;

/// All computed outputs of a single `dash summary` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub selection: FilterSelection,
    pub result: AggregationResult,
}

/// Build the dataset the configuration describes.
pub fn build_dataset(config: &DashConfig) -> Result<Dataset, AppError> {
    generate_sample(&SampleConfig {
        seed: config.sample_seed,
        count: config.sample_count,
        vocabulary: Vocabulary::fmcg(),
    })
}

/// Resolve the configured (or default) selection against a dataset.
pub fn initial_selection(dataset: &Dataset, config: &DashConfig) -> Result<FilterSelection, AppError> {
    let mut selection = default_selection(dataset, config.region.as_deref(), config.default_products)?;
    if let Some(products) = &config.products {
        selection.products = products.clone();
    }
    Ok(selection)
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_summary(config: &DashConfig) -> Result<RunOutput, AppError> {
    let dataset = build_dataset(config)?;
    run_summary_with_dataset(config, dataset)
}

/// Execute the pipeline against an already built dataset.
pub fn run_summary_with_dataset(config: &DashConfig, dataset: Dataset) -> Result<RunOutput, AppError> {
    let selection = initial_selection(&dataset, config)?;
    let result = aggregate(&dataset, &selection)?;

    Ok(RunOutput {
        dataset,
        selection,
        result,
    })
}

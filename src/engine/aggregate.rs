//! Filter-and-aggregate over the immutable dataset.
//!
//! Every function here is pure: the dataset and the selection are only read,
//! and each call recomputes its output from scratch.

use std::collections::BTreeMap;

use crate::data::Dataset;
use crate::domain::{AggregationResult, FilterSelection, Month, Record, Totals};
use crate::error::AppError;

/// Compute every dashboard output for one selection.
///
/// The region is validated before anything is computed, so a failed call never
/// yields a partial result.
pub fn aggregate(dataset: &Dataset, selection: &FilterSelection) -> Result<AggregationResult, AppError> {
    let filtered_records = filter_records(dataset, selection)?;

    let totals = compute_totals(&filtered_records);
    let by_product = sales_by_product(&filtered_records);
    let by_month = sales_by_month(&filtered_records);

    tracing::debug!(
        region = %selection.region,
        products = selection.products.len(),
        rows = filtered_records.len(),
        "aggregated selection"
    );

    Ok(AggregationResult {
        filtered_records,
        totals,
        by_product,
        by_month,
    })
}

/// Records matching the selection, in dataset order.
pub fn filter_records(dataset: &Dataset, selection: &FilterSelection) -> Result<Vec<Record>, AppError> {
    ensure_region_known(dataset, &selection.region)?;

    Ok(dataset
        .all_records()
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect())
}

/// Sum sales, units and target independently.
pub fn compute_totals(records: &[Record]) -> Totals {
    Totals {
        sales_amount: records.iter().map(|r| r.sales_amount).sum(),
        units_sold: records.iter().map(|r| r.units_sold).sum(),
        target: records.iter().map(|r| r.target).sum(),
    }
}

/// Sales per product, keyed only by products that occur in `records`.
pub fn sales_by_product(records: &[Record]) -> BTreeMap<String, f64> {
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *out.entry(r.product.clone()).or_insert(0.0) += r.sales_amount;
    }
    out
}

/// Sales per month over the full calendar (absent months are 0).
pub fn sales_by_month(records: &[Record]) -> Vec<(Month, f64)> {
    let mut sums = [0.0_f64; 12];
    for r in records {
        sums[r.month.index()] += r.sales_amount;
    }
    Month::ALL.into_iter().zip(sums).collect()
}

fn ensure_region_known(dataset: &Dataset, region: &str) -> Result<(), AppError> {
    if dataset.vocabulary().has_region(region) {
        return Ok(());
    }
    Err(AppError::not_found(format!(
        "Unknown region '{region}'. Expected one of: {}.",
        dataset.vocabulary().regions.join(", ")
    )))
}

//! Parallel evaluation of several candidate selections.
//!
//! The dataset is never mutated after construction, so each selection can be
//! aggregated on its own rayon worker without locking.

use rayon::prelude::*;

use crate::data::Dataset;
use crate::domain::{AggregationResult, FilterSelection};
use crate::engine::aggregate::aggregate;
use crate::error::AppError;

/// Aggregate every selection; results are returned in input order.
pub fn aggregate_many(
    dataset: &Dataset,
    selections: &[FilterSelection],
) -> Vec<Result<AggregationResult, AppError>> {
    selections
        .par_iter()
        .map(|selection| aggregate(dataset, selection))
        .collect()
}

/// Aggregate `products` in every region of the vocabulary.
///
/// Useful for precomputing the region switcher in one pass. The first failing
/// region aborts the whole batch.
pub fn aggregate_all_regions(
    dataset: &Dataset,
    products: &[String],
) -> Result<Vec<(String, AggregationResult)>, AppError> {
    dataset
        .vocabulary()
        .regions
        .par_iter()
        .map(|region| {
            let selection = FilterSelection::new(region.clone(), products.iter().cloned());
            aggregate(dataset, &selection).map(|result| (region.clone(), result))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleConfig, generate_sample};
    use crate::error::ErrorKind;

    #[test]
    fn batch_matches_sequential_and_keeps_order() {
        let ds = generate_sample(&SampleConfig::default()).unwrap();
        let selections = vec![
            FilterSelection::new("North", ["Soap"]),
            FilterSelection::new("Nowhere", ["Soap"]),
            FilterSelection::new("East", ["Juice", "Snacks"]),
            FilterSelection::for_region("West"),
        ];

        let results = aggregate_many(&ds, &selections);
        assert_eq!(results.len(), selections.len());

        for (selection, result) in selections.iter().zip(&results) {
            match (aggregate(&ds, selection), result) {
                (Ok(expected), Ok(got)) => assert_eq!(&expected, got),
                (Err(_), Err(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
                other => panic!("batch and sequential disagree: {other:?}"),
            }
        }
    }

    #[test]
    fn all_regions_partition_the_product_sales() {
        let ds = generate_sample(&SampleConfig::default()).unwrap();
        let products = vec!["Soap".to_string(), "Juice".to_string()];

        let per_region = aggregate_all_regions(&ds, &products).unwrap();
        assert_eq!(per_region.len(), 5);

        let regions: Vec<&str> = per_region.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(regions, ["North", "South", "East", "West", "Central"]);

        let sum: f64 = per_region.iter().map(|(_, r)| r.totals.sales_amount).sum();
        let expected: f64 = ds
            .all_records()
            .iter()
            .filter(|r| products.contains(&r.product))
            .map(|r| r.sales_amount)
            .sum();
        assert!((sum - expected).abs() < 1e-6 * expected.max(1.0));
    }

    #[test]
    fn all_regions_over_an_empty_vocabulary_is_empty() {
        let ds = Dataset::new(crate::domain::Vocabulary::new(["Soap"], Vec::<String>::new()), Vec::new()).unwrap();
        let per_region = aggregate_all_regions(&ds, &["Soap".to_string()]).unwrap();
        assert!(per_region.is_empty());
    }
}

//! Initial selection helpers for front-ends.
//!
//! The engine works for any selection; which products start out selected is a
//! presentation choice captured by `DefaultProducts`.

use crate::data::Dataset;
use crate::domain::{DefaultProducts, Dimension, FilterSelection};
use crate::error::AppError;

/// Build the selection a front-end starts with.
///
/// - region: `region` if given, otherwise the first distinct region
/// - products: the first distinct product, or all of them
pub fn default_selection(
    dataset: &Dataset,
    region: Option<&str>,
    mode: DefaultProducts,
) -> Result<FilterSelection, AppError> {
    let region = match region {
        Some(r) => r.to_string(),
        None => first_region(dataset)?,
    };

    let distinct = dataset.distinct_values(Dimension::Product)?;
    let products = match mode {
        DefaultProducts::First => distinct.into_iter().take(1).collect(),
        DefaultProducts::All => distinct,
    };

    Ok(FilterSelection { region, products })
}

/// First region in dataset order, falling back to the vocabulary for an empty dataset.
pub fn first_region(dataset: &Dataset) -> Result<String, AppError> {
    dataset
        .distinct_values(Dimension::Region)?
        .into_iter()
        .next()
        .or_else(|| dataset.vocabulary().regions.first().cloned())
        .ok_or_else(|| AppError::not_found("Dataset has no regions to select."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Month, Record, Vocabulary};

    fn dataset() -> Dataset {
        let row = |product: &str, region: &str| Record {
            product: product.to_string(),
            region: region.to_string(),
            month: Month::May,
            sales_amount: 1.0,
            units_sold: 1,
            target: 1.0,
        };
        Dataset::new(
            Vocabulary::fmcg(),
            vec![row("Juice", "East"), row("Soap", "North"), row("Juice", "West")],
        )
        .unwrap()
    }

    #[test]
    fn first_mode_picks_first_distinct_product() {
        let sel = default_selection(&dataset(), None, DefaultProducts::First).unwrap();
        assert_eq!(sel, FilterSelection::new("East", ["Juice"]));
    }

    #[test]
    fn all_mode_picks_every_distinct_product() {
        let sel = default_selection(&dataset(), Some("North"), DefaultProducts::All).unwrap();
        assert_eq!(sel, FilterSelection::new("North", ["Juice", "Soap"]));
    }

    #[test]
    fn empty_dataset_falls_back_to_vocabulary_region() {
        let ds = Dataset::new(Vocabulary::fmcg(), Vec::new()).unwrap();
        let sel = default_selection(&ds, None, DefaultProducts::All).unwrap();
        assert_eq!(sel.region, "North");
        assert!(sel.products.is_empty());
    }
}

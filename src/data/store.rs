//! Immutable in-memory dataset.
//!
//! The dataset is built once by the composition root and then only read. It is
//! reference counted so the TUI, the CLI report and parallel aggregation can
//! share it without copying rows.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Dimension, Record, Vocabulary};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Dataset {
    vocabulary: Arc<Vocabulary>,
    records: Arc<[Record]>,
}

impl Dataset {
    /// Build a dataset, validating every record against `vocabulary`.
    ///
    /// The grand total of `units_sold` must fit in a `u64`, so every filtered
    /// subset can be summed without overflow.
    pub fn new(vocabulary: Vocabulary, records: Vec<Record>) -> Result<Self, AppError> {
        let mut units_total: u64 = 0;
        for (idx, record) in records.iter().enumerate() {
            validate_record(idx, record, &vocabulary)?;
            units_total = units_total.checked_add(record.units_sold).ok_or_else(|| {
                AppError::invalid_argument(format!(
                    "Row {}: units sold overflow the dataset total.",
                    idx + 1
                ))
            })?;
        }

        Ok(Self {
            vocabulary: Arc::new(vocabulary),
            records: records.into(),
        })
    }

    /// The full, unfiltered dataset in its original order.
    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique values of `dimension` in first-occurrence order.
    ///
    /// Only `product` and `region` are filterable; anything else is rejected.
    pub fn distinct_values(&self, dimension: Dimension) -> Result<Vec<String>, AppError> {
        let field: fn(&Record) -> &str = match dimension {
            Dimension::Product => product_of,
            Dimension::Region => region_of,
            Dimension::Month => {
                return Err(AppError::invalid_argument(format!(
                    "Distinct values are only available for product and region (got {dimension})."
                )));
            }
        };

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for record in self.records.iter() {
            let value = field(record);
            if seen.insert(value) {
                out.push(value.to_string());
            }
        }
        Ok(out)
    }
}

fn product_of(record: &Record) -> &str {
    &record.product
}

fn region_of(record: &Record) -> &str {
    &record.region
}

fn validate_record(idx: usize, record: &Record, vocabulary: &Vocabulary) -> Result<(), AppError> {
    let row = idx + 1;
    if !vocabulary.has_product(&record.product) {
        return Err(AppError::invalid_argument(format!(
            "Row {row}: unknown product '{}'.",
            record.product
        )));
    }
    if !vocabulary.has_region(&record.region) {
        return Err(AppError::invalid_argument(format!(
            "Row {row}: unknown region '{}'.",
            record.region
        )));
    }
    if !(record.sales_amount.is_finite() && record.sales_amount >= 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Row {row}: sales amount must be a non-negative number."
        )));
    }
    if !(record.target.is_finite() && record.target >= 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Row {row}: target must be a non-negative number."
        )));
    }
    Ok(())
}

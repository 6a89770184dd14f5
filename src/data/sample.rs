//! Synthetic FMCG sales sample generation.
//!
//! The reference dashboard runs on a seeded, randomly generated table so every
//! session sees the same numbers. Columns are drawn one after another (all
//! products, then all regions, ...) so changing a value range never reshuffles
//! the categorical columns drawn before it.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::data::store::Dataset;
use crate::domain::{Month, Record, Vocabulary};
use crate::error::AppError;

pub const DEFAULT_SAMPLE_SEED: u64 = 42;
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Half-open value ranges, in whole currency units / units.
const SALES_RANGE: std::ops::Range<u32> = 5_000..50_000;
const UNITS_RANGE: std::ops::Range<u64> = 100..5_000;
const TARGET_RANGE: std::ops::Range<u32> = 4_000..50_000;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub count: usize,
    pub vocabulary: Vocabulary,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SAMPLE_SEED,
            count: DEFAULT_SAMPLE_COUNT,
            vocabulary: Vocabulary::fmcg(),
        }
    }
}

pub fn generate_sample(config: &SampleConfig) -> Result<Dataset, AppError> {
    if config.count == 0 {
        return Err(AppError::invalid_argument("Sample count must be > 0."));
    }
    let vocab = &config.vocabulary;
    if vocab.products.is_empty() || vocab.regions.is_empty() {
        return Err(AppError::invalid_argument(
            "Sample vocabulary needs at least one product and one region.",
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.count;

    let products = draw_column(&mut rng, n, &vocab.products);
    let regions = draw_column(&mut rng, n, &vocab.regions);
    let months = draw_column(&mut rng, n, &Month::ALL);
    let sales: Vec<u32> = (0..n).map(|_| rng.gen_range(SALES_RANGE)).collect();
    let units: Vec<u64> = (0..n).map(|_| rng.gen_range(UNITS_RANGE)).collect();
    let targets: Vec<u32> = (0..n).map(|_| rng.gen_range(TARGET_RANGE)).collect();

    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        records.push(Record {
            product: products[i].clone(),
            region: regions[i].clone(),
            month: months[i],
            sales_amount: f64::from(sales[i]),
            units_sold: units[i],
            target: f64::from(targets[i]),
        });
    }

    tracing::debug!(seed = config.seed, count = n, "generated sample dataset");
    Dataset::new(vocab.clone(), records)
}

fn draw_column<T: Clone>(rng: &mut StdRng, n: usize, values: &[T]) -> Vec<T> {
    (0..n).map(|_| values[rng.gen_range(0..values.len())].clone()).collect()
}

//! Dataset construction and storage.
//!
//! - `store`: the immutable, validated in-memory table
//! - `sample`: seeded synthetic FMCG sales data

pub mod sample;
pub mod store;

pub use sample::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_SEED, SampleConfig, generate_sample};
pub use store::Dataset;

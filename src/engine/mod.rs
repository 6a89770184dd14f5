//! Aggregation engine.
//!
//! Responsibilities:
//!
//! - filter the dataset by region + product selection
//! - reduce the filtered rows to KPI totals and per-product / per-month sums
//! - evaluate several selections in parallel (read-only dataset)
//! - seed the initial selection for front-ends

pub mod aggregate;
pub mod batch;
pub mod selection;

pub use aggregate::*;
pub use batch::*;
pub use selection::*;

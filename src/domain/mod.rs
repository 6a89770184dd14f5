//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical dimensions (`Month`, `Dimension`, `Vocabulary`)
//! - sales observations (`Record`) and the user's `FilterSelection`
//! - aggregation outputs (`Totals`, `AggregationResult`)
//! - the resolved run configuration (`DashConfig`)

pub mod types;

pub use types::*;

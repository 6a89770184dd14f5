//! Input/output helpers.
//!
//! - filtered rows to CSV (`export`)
//! - aggregation snapshot JSON read/write (`snapshot`)

pub mod export;
pub mod snapshot;

pub use export::*;
pub use snapshot::*;

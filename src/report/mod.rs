//! Reporting utilities: formatted terminal output for the dashboard sections.

pub mod format;

pub use format::*;

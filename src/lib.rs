//! `sales-dash` library crate.
//!
//! The binary (`dash`) is a thin wrapper around this library so that:
//!
//! - the dataset store and aggregation engine are testable without a terminal
//! - the CLI report and the TUI share one pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;

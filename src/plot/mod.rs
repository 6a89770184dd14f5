//! Terminal plots for the non-interactive `summary` command.

pub mod ascii;

pub use ascii::*;

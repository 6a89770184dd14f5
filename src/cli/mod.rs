//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! command dispatch (`app`) and from the aggregation code (`engine`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DefaultProducts, Dimension};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dash", version, about = "FMCG sales dashboard (filter + aggregate)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print KPIs, sales by product and the monthly trend for one selection.
    Summary(DashArgs),
    /// List the distinct values of a dimension in first-occurrence order.
    Values(ValuesArgs),
    /// Re-render a snapshot written by `dash summary --export-json`.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same aggregation engine as `dash summary`, but renders the
    /// results as tabs, charts and a table using Ratatui.
    Tui(DashArgs),
}

/// Sample dataset options shared by every command that builds a dataset.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Random seed for the sample dataset [env: DASH_SEED] [default: 42].
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of sample records [env: DASH_RECORDS] [default: 100].
    #[arg(short = 'n', long)]
    pub records: Option<usize>,

    /// Log filter, e.g. `debug` or `sales_dash=trace` [env: DASH_LOG] [default: warn].
    #[arg(long)]
    pub log: Option<String>,

    /// Append logs to this file instead of stderr [env: DASH_LOG_FILE].
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Selection and output options for `summary` and `tui`.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    /// Region to show (defaults to the first region in the dataset).
    #[arg(short = 'r', long)]
    pub region: Option<String>,

    /// Products to include; repeat or comma-separate (defaults per --default-products).
    #[arg(short = 'p', long = "product", value_delimiter = ',')]
    pub products: Vec<String>,

    /// Initial products when none are given.
    #[arg(long, value_enum, default_value_t = DefaultProducts::First)]
    pub default_products: DefaultProducts,

    /// Also print the filtered rows.
    #[arg(long)]
    pub table: bool,

    /// Render ASCII charts in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 48)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 10)]
    pub height: usize,

    /// Export the filtered rows to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Export the selection and all aggregates to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    /// Dimension to list (product, region).
    #[arg(short = 'd', long, value_enum)]
    pub dimension: Dimension,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Snapshot JSON file produced by `dash summary --export-json`.
    #[arg(long, value_name = "JSON")]
    pub snapshot: PathBuf,

    /// Also print the stored rows.
    #[arg(long)]
    pub table: bool,
}

//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - held in the immutable in-memory dataset
//! - produced by the aggregation engine on every selection change
//! - exported to CSV/JSON

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Calendar month, in canonical Jan..Dec order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Zero-based position in the calendar (Jan = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Month::ALL
            .into_iter()
            .find(|m| m.abbrev().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::invalid_argument(format!("Unknown month '{s}'.")))
    }
}

/// A categorical field usable for filtering or grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Dimension {
    Product,
    Region,
    Month,
}

impl Dimension {
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Product => "product",
            Dimension::Region => "region",
            Dimension::Month => "month",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(Dimension::Product),
            "region" => Ok(Dimension::Region),
            "month" => Ok(Dimension::Month),
            other => Err(AppError::invalid_argument(format!("Unknown dimension '{other}'."))),
        }
    }
}

/// Fixed value sets of the categorical dimensions.
///
/// Months are not listed here: the calendar is always `Month::ALL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub products: Vec<String>,
    pub regions: Vec<String>,
}

impl Vocabulary {
    pub fn new<P, R>(products: P, regions: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            products: products.into_iter().map(Into::into).collect(),
            regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// The FMCG vocabulary of the reference dashboard.
    pub fn fmcg() -> Self {
        Self::new(
            ["Soap", "Shampoo", "Toothpaste", "Detergent", "Juice", "Snacks"],
            ["North", "South", "East", "West", "Central"],
        )
    }

    pub fn has_product(&self, product: &str) -> bool {
        self.products.iter().any(|p| p == product)
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::fmcg()
    }
}

/// One sales observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub product: String,
    pub region: String,
    pub month: Month,
    pub sales_amount: f64,
    pub units_sold: u64,
    pub target: f64,
}

/// Region + product filter chosen by the presentation layer.
///
/// An empty `products` list matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub region: String,
    pub products: Vec<String>,
}

impl FilterSelection {
    pub fn new<I>(region: impl Into<String>, products: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            region: region.into(),
            products: products.into_iter().map(Into::into).collect(),
        }
    }

    /// A selection with no products yet.
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            products: Vec::new(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.region == self.region && self.products.iter().any(|p| *p == record.product)
    }

    /// Add the product if absent, remove it otherwise.
    pub fn toggle_product(&mut self, product: &str) {
        if let Some(pos) = self.products.iter().position(|p| p == product) {
            self.products.remove(pos);
        } else {
            self.products.push(product.to_string());
        }
    }
}

/// KPI totals over the filtered records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub sales_amount: f64,
    pub units_sold: u64,
    pub target: f64,
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub filtered_records: Vec<Record>,
    pub totals: Totals,
    /// Only products present in `filtered_records`.
    pub by_product: BTreeMap<String, f64>,
    /// Always 12 entries, Jan..Dec.
    pub by_month: Vec<(Month, f64)>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.filtered_records.is_empty()
    }
}

/// How the presentation layer seeds the initial product selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultProducts {
    /// Only the first distinct product in the dataset.
    First,
    /// Every distinct product in the dataset.
    All,
}

/// A full run's configuration as understood by the app.
///
/// This is derived from CLI flags, environment variables and defaults.
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub sample_seed: u64,
    pub sample_count: usize,

    /// Explicit region; `None` means the first distinct region.
    pub region: Option<String>,
    /// Explicit products; `None` means `default_products` decides.
    pub products: Option<Vec<String>>,
    pub default_products: DefaultProducts,

    pub show_table: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

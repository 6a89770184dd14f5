//! Formatted terminal output for the dashboard sections.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized (the CLI tests match on these strings)

use std::collections::BTreeMap;

use crate::domain::{AggregationResult, FilterSelection, Month, Record, Totals};

pub const NO_DATA: &str = "No data available for the selected filters.";

/// Format every section for one selection, in dashboard tab order.
pub fn format_summary(selection: &FilterSelection, result: &AggregationResult, show_table: bool) -> String {
    let region = &selection.region;
    let mut out = String::new();

    out.push_str("=== FMCG Sales Dashboard ===\n");
    out.push_str(&format!("Region: {region}\n"));
    out.push_str(&format!("Products: {}\n", fmt_products(&selection.products)));
    out.push_str(&format!("Rows: {}\n\n", result.filtered_records.len()));

    out.push_str(&format!("Key Performance Indicators for {region}:\n"));
    out.push_str(&format_kpis(&result.totals));
    out.push('\n');

    out.push_str(&format!("Sales Distribution by Product in {region}:\n"));
    if result.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
    } else {
        out.push_str(&format_by_product(&result.by_product));
    }
    out.push('\n');

    out.push_str(&format!("Monthly Sales Trend for {region}:\n"));
    if result.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
    } else {
        out.push_str(&format_by_month(&result.by_month));
    }

    if show_table {
        out.push('\n');
        out.push_str(&format!("Sales Data for {region}:\n"));
        out.push_str(&format_records(&result.filtered_records));
    }

    out
}

/// The three KPI metrics.
pub fn format_kpis(totals: &Totals) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<18} {:>16}\n", "Total Sales", fmt_currency(totals.sales_amount)));
    out.push_str(&format!("{:<18} {:>16}\n", "Total Units Sold", fmt_count(totals.units_sold)));
    out.push_str(&format!("{:<18} {:>16}\n", "Total Target", fmt_currency(totals.target)));
    out
}

pub fn format_by_product(by_product: &BTreeMap<String, f64>) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<14} {:>16}\n", "product", "sales").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<14} {:-<16}\n", "", "").trim_end());
    out.push('\n');
    for (product, sales) in by_product {
        out.push_str(&format!("{:<14} {:>16}\n", truncate(product, 14), fmt_currency(*sales)));
    }
    out
}

pub fn format_by_month(by_month: &[(Month, f64)]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<6} {:>16}\n", "month", "sales").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<16}\n", "", "").trim_end());
    out.push('\n');
    for (month, sales) in by_month {
        out.push_str(&format!("{:<6} {:>16}\n", month.abbrev(), fmt_currency(*sales)));
    }
    out
}

/// Tabular listing of the filtered rows.
pub fn format_records(rows: &[Record]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:<10} {:<5} {:>12} {:>10} {:>12}\n",
            "Product", "Region", "Month", "SalesAmount", "UnitsSold", "Target"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<10} {:-<5} {:-<12} {:-<10} {:-<12}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<12} {:<10} {:<5} {:>12.2} {:>10} {:>12.2}\n",
                truncate(&r.product, 12),
                truncate(&r.region, 10),
                r.month.abbrev(),
                r.sales_amount,
                r.units_sold,
                r.target,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// `$12,345.60`
pub fn fmt_currency(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", v.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// `12,345`
pub fn fmt_count(v: u64) -> String {
    group_thousands(&v.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn fmt_products(products: &[String]) -> String {
    if products.is_empty() {
        "(none)".to_string()
    } else {
        products.join(", ")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

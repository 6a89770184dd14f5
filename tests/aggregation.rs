use sales_dash::data::{Dataset, SampleConfig, generate_sample};
use sales_dash::domain::{Dimension, FilterSelection, Month, Record, Vocabulary};
use sales_dash::engine::{aggregate, aggregate_all_regions, aggregate_many, compute_totals};
use sales_dash::error::ErrorKind;

fn sample() -> Dataset {
    generate_sample(&SampleConfig::default()).expect("sample dataset")
}

fn record(product: &str, region: &str, month: Month, sales: f64, units: u64, target: f64) -> Record {
    Record {
        product: product.to_string(),
        region: region.to_string(),
        month,
        sales_amount: sales,
        units_sold: units,
        target,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn every_selection(ds: &Dataset) -> Vec<FilterSelection> {
    let products = ds.distinct_values(Dimension::Product).unwrap();
    let mut out = Vec::new();
    for region in &ds.vocabulary().regions {
        out.push(FilterSelection::new(region.clone(), products.iter().cloned()));
        out.push(FilterSelection::new(region.clone(), products.iter().take(2).cloned()));
        out.push(FilterSelection::new(region.clone(), [products[0].clone()]));
    }
    out
}

#[test]
fn totals_match_row_sums() {
    let ds = sample();
    for selection in every_selection(&ds) {
        let result = aggregate(&ds, &selection).unwrap();
        let rows = &result.filtered_records;
        assert!(close(result.totals.sales_amount, rows.iter().map(|r| r.sales_amount).sum()));
        assert_eq!(result.totals.units_sold, rows.iter().map(|r| r.units_sold).sum::<u64>());
        assert!(close(result.totals.target, rows.iter().map(|r| r.target).sum()));
    }
}

#[test]
fn filtered_rows_satisfy_the_selection() {
    let ds = sample();
    for selection in every_selection(&ds) {
        let result = aggregate(&ds, &selection).unwrap();
        assert!(result.filtered_records.iter().all(|r| selection.matches(r)));
        let expected = ds.all_records().iter().filter(|r| selection.matches(r)).count();
        assert_eq!(result.filtered_records.len(), expected);
    }
}

#[test]
fn month_grouping_is_full_calendar_and_sums_to_total() {
    let ds = sample();
    for selection in every_selection(&ds) {
        let result = aggregate(&ds, &selection).unwrap();
        let months: Vec<Month> = result.by_month.iter().map(|(m, _)| *m).collect();
        assert_eq!(months, Month::ALL);
        let sum: f64 = result.by_month.iter().map(|(_, v)| v).sum();
        assert!(close(sum, result.totals.sales_amount));
    }
}

#[test]
fn product_grouping_only_has_present_products() {
    let ds = sample();
    for selection in every_selection(&ds) {
        let result = aggregate(&ds, &selection).unwrap();
        for (product, sales) in &result.by_product {
            assert!(result.filtered_records.iter().any(|r| &r.product == product));
            assert!(*sales >= 0.0);
        }
        let sum: f64 = result.by_product.values().sum();
        assert!(close(sum, result.totals.sales_amount));
    }
}

#[test]
fn refiltering_the_filtered_rows_changes_nothing() {
    let ds = sample();
    for selection in every_selection(&ds) {
        let first = aggregate(&ds, &selection).unwrap();
        let narrowed = Dataset::new(Vocabulary::fmcg(), first.filtered_records.clone()).unwrap();
        let second = aggregate(&narrowed, &selection).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn no_products_means_no_rows() {
    let ds = sample();
    for region in &ds.vocabulary().regions {
        let result = aggregate(&ds, &FilterSelection::for_region(region.clone())).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.totals.sales_amount, 0.0);
        assert_eq!(result.totals.units_sold, 0);
        assert!(result.by_product.is_empty());
        assert!(result.by_month.iter().all(|(_, v)| *v == 0.0));
    }
}

#[test]
fn unknown_region_is_not_found() {
    let ds = sample();
    let err = aggregate(&ds, &FilterSelection::new("Atlantis", ["Soap"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn month_is_not_a_distinct_value_dimension() {
    let err = sample().distinct_values(Dimension::Month).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn single_soap_record_scenario() {
    let ds = Dataset::new(
        Vocabulary::fmcg(),
        vec![record("Soap", "North", Month::Jan, 100.0, 10, 90.0)],
    )
    .unwrap();

    let result = aggregate(&ds, &FilterSelection::new("North", ["Soap"])).unwrap();
    assert_eq!(result.filtered_records.len(), 1);
    assert_eq!(result.totals.sales_amount, 100.0);
    assert_eq!(result.totals.units_sold, 10);
    assert_eq!(result.totals.target, 90.0);
    assert_eq!(result.by_product.get("Soap"), Some(&100.0));
    assert_eq!(result.by_month[0], (Month::Jan, 100.0));
    assert!(result.by_month[1..].iter().all(|(_, v)| *v == 0.0));

    let south = aggregate(&ds, &FilterSelection::new("South", ["Soap"])).unwrap();
    assert!(south.is_empty());
}

#[test]
fn two_products_same_month_scenario() {
    let ds = Dataset::new(
        Vocabulary::fmcg(),
        vec![
            record("Soap", "East", Month::Mar, 200.0, 20, 150.0),
            record("Juice", "East", Month::Mar, 50.0, 5, 80.0),
            record("Soap", "West", Month::Mar, 999.0, 99, 999.0),
        ],
    )
    .unwrap();

    let result = aggregate(&ds, &FilterSelection::new("East", ["Soap", "Juice"])).unwrap();
    assert_eq!(result.totals.sales_amount, 250.0);
    assert_eq!(result.totals.units_sold, 25);
    assert_eq!(result.totals.target, 230.0);
    assert_eq!(result.by_product.len(), 2);
    assert_eq!(result.by_month[2], (Month::Mar, 250.0));
    assert_eq!(compute_totals(&result.filtered_records), result.totals);
}

#[test]
fn parallel_batches_agree_with_single_runs() {
    let ds = sample();
    let selections = every_selection(&ds);
    let batch = aggregate_many(&ds, &selections);
    for (selection, got) in selections.iter().zip(batch) {
        assert_eq!(got.unwrap(), aggregate(&ds, selection).unwrap());
    }

    let products = ds.distinct_values(Dimension::Product).unwrap();
    let per_region = aggregate_all_regions(&ds, &products).unwrap();
    assert_eq!(per_region.len(), ds.vocabulary().regions.len());
    let grand: f64 = per_region.iter().map(|(_, r)| r.totals.sales_amount).sum();
    let all: f64 = ds.all_records().iter().map(|r| r.sales_amount).sum();
    assert!(close(grand, all));
}

#[test]
fn same_seed_same_dataset() {
    assert_eq!(sample().all_records(), sample().all_records());
    let other = generate_sample(&SampleConfig {
        seed: 7,
        ..SampleConfig::default()
    })
    .unwrap();
    assert_eq!(other.len(), 100);
    assert_ne!(other.all_records(), sample().all_records());
}

#[test]
fn huge_unit_counts_are_rejected_before_aggregation() {
    let half = u64::MAX / 2;
    let ds = Dataset::new(
        Vocabulary::fmcg(),
        vec![
            record("Soap", "North", Month::Jan, 1.0, half, 1.0),
            record("Soap", "North", Month::Feb, 1.0, half, 1.0),
        ],
    )
    .unwrap();
    let result = aggregate(&ds, &FilterSelection::new("North", ["Soap"])).unwrap();
    assert_eq!(result.totals.units_sold, half * 2);

    let err = Dataset::new(
        Vocabulary::fmcg(),
        vec![
            record("Soap", "North", Month::Jan, 1.0, u64::MAX, 1.0),
            record("Soap", "North", Month::Jan, 1.0, u64::MAX, 1.0),
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

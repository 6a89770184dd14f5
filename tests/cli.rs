use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dash").unwrap();
    for key in ["DASH_SEED", "DASH_RECORDS", "DASH_LOG", "DASH_LOG_FILE"] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn summary_prints_all_sections() {
    cmd()
        .args(["summary", "-r", "North", "-p", "Soap,Juice", "--no-plot"])
        .assert()
        .success()
        .stdout(contains("=== FMCG Sales Dashboard ==="))
        .stdout(contains("Key Performance Indicators for North"))
        .stdout(contains("Sales Distribution by Product in North"))
        .stdout(contains("Monthly Sales Trend for North"));
}

#[test]
fn summary_without_products_reports_no_data() {
    cmd()
        .args(["summary", "-r", "East", "--no-plot", "-p", ""])
        .assert()
        .success()
        .stdout(contains("No data available for the selected filters."));
}

#[test]
fn unknown_region_exits_with_not_found() {
    cmd()
        .args(["summary", "-r", "Atlantis"])
        .assert()
        .code(3)
        .stderr(contains("Atlantis"));
}

#[test]
fn values_lists_regions() {
    cmd()
        .args(["values", "-d", "region"])
        .assert()
        .success()
        .stdout(contains("North"))
        .stdout(contains("Central"));
}

#[test]
fn values_rejects_month() {
    cmd().args(["values", "-d", "month"]).assert().code(2);
}

#[test]
fn env_seed_changes_the_dataset() {
    let default = cmd().args(["summary", "--table", "--no-plot"]).output().unwrap();
    let seeded = cmd()
        .env("DASH_SEED", "7")
        .args(["summary", "--table", "--no-plot"])
        .output()
        .unwrap();
    assert!(default.status.success() && seeded.status.success());
    assert_ne!(default.stdout, seeded.stdout);
}

#[test]
fn exports_round_trip_through_show() {
    let dir = TempDir::new().expect("temp dir");
    let csv = dir.path().join("rows.csv");
    let json = dir.path().join("snap.json");

    cmd()
        .args(["summary", "-r", "West", "--default-products", "all", "--no-plot"])
        .arg("--export-csv")
        .arg(&csv)
        .arg("--export-json")
        .arg(&json)
        .assert()
        .success();

    let rows = std::fs::read_to_string(&csv).unwrap();
    assert!(rows.starts_with("Product,Region,Month,SalesAmount,UnitsSold,Target"));
    assert!(rows.lines().skip(1).all(|l| l.contains(",West,")));

    cmd()
        .arg("show")
        .arg("--snapshot")
        .arg(&json)
        .assert()
        .success()
        .stdout(contains("# snapshot").and(contains("seed 42, 100 records")))
        .stdout(contains("Key Performance Indicators for West"));
}

#[test]
fn every_command_has_help() {
    for sub in ["summary", "values", "show", "tui"] {
        cmd().args([sub, "--help"]).assert().success();
    }
}

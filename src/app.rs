//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (with `.env` / environment defaults)
//! - sets up logging
//! - builds the sample dataset once
//! - runs the aggregation engine for the chosen selection
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::cli::{Command, DashArgs, SampleArgs, ShowArgs, ValuesArgs};
use crate::data::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_SEED};
use crate::domain::{DashConfig, DefaultProducts};
use crate::error::AppError;
use crate::logging::{DEFAULT_LOG_FILTER, LogSink};

pub mod pipeline;

const ENV_SEED: &str = "DASH_SEED";
const ENV_RECORDS: &str = "DASH_RECORDS";
const ENV_LOG: &str = "DASH_LOG";
const ENV_LOG_FILE: &str = "DASH_LOG_FILE";

/// Entry point for the `dash` binary.
pub fn run() -> Result<(), AppError> {
    // `dash` and `dash -r East` behave like `dash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Values(args) => handle_values(args),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: DashArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args)?;
    init_logging(&config, false)?;

    let run = pipeline::run_summary(&config)?;

    println!(
        "{}",
        crate::report::format_summary(&run.selection, &run.result, config.show_table)
    );

    if config.plot && !run.result.is_empty() {
        println!("{}", crate::plot::render_product_bars(&run.result.by_product, config.plot_width));
        println!(
            "{}",
            crate::plot::render_month_trend(&run.result.by_month, config.plot_width, config.plot_height)
        );
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_records_csv(path, &run.result.filtered_records)?;
    }
    if let Some(path) = &config.export_json {
        let snapshot = crate::io::SnapshotFile::new(
            &run.selection,
            &run.result,
            config.sample_seed,
            config.sample_count,
        );
        crate::io::write_snapshot_json(path, &snapshot)?;
    }

    Ok(())
}

fn handle_values(args: ValuesArgs) -> Result<(), AppError> {
    let config = config_from_sample_args(&args.sample, &env_var)?;
    init_logging(&config, false)?;

    let dataset = pipeline::build_dataset(&config)?;
    for value in dataset.distinct_values(args.dimension)? {
        println!("{value}");
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let snapshot = crate::io::read_snapshot_json(&args.snapshot)?;
    println!(
        "# snapshot {} (seed {}, {} records)",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.sample_seed,
        snapshot.sample_count,
    );
    println!(
        "{}",
        crate::report::format_summary(&snapshot.selection, &snapshot.result, args.table)
    );
    Ok(())
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args)?;
    init_logging(&config, true)?;
    crate::tui::run(config)
}

fn init_logging(config: &DashConfig, owns_terminal: bool) -> Result<(), AppError> {
    let sink = LogSink::for_frontend(config.log_file.as_deref(), owns_terminal);
    crate::logging::init(&config.log_filter, &sink)
}

/// Defaults used when neither flags nor environment say otherwise.
pub fn default_config() -> DashConfig {
    DashConfig {
        sample_seed: DEFAULT_SAMPLE_SEED,
        sample_count: DEFAULT_SAMPLE_COUNT,
        region: None,
        products: None,
        default_products: DefaultProducts::First,
        show_table: false,
        plot: true,
        plot_width: 48,
        plot_height: 10,
        export_csv: None,
        export_json: None,
        log_filter: DEFAULT_LOG_FILTER.to_string(),
        log_file: None,
    }
}

pub fn dash_config_from_args(args: &DashArgs) -> Result<DashConfig, AppError> {
    dash_config_with_env(args, &env_var)
}

/// Resolve a config from flags, falling back to `env` lookups, then defaults.
pub fn dash_config_with_env(
    args: &DashArgs,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<DashConfig, AppError> {
    let base = config_from_sample_args(&args.sample, env)?;
    Ok(DashConfig {
        region: args.region.clone(),
        products: if args.products.is_empty() {
            None
        } else {
            Some(args.products.clone())
        },
        default_products: args.default_products,
        show_table: args.table,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
        ..base
    })
}

fn config_from_sample_args(
    args: &SampleArgs,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<DashConfig, AppError> {
    let defaults = default_config();
    Ok(DashConfig {
        sample_seed: match args.seed {
            Some(seed) => seed,
            None => parse_env(env, ENV_SEED)?.unwrap_or(defaults.sample_seed),
        },
        sample_count: match args.records {
            Some(n) => n,
            None => parse_env(env, ENV_RECORDS)?.unwrap_or(defaults.sample_count),
        },
        log_filter: args
            .log
            .clone()
            .or_else(|| env(ENV_LOG))
            .unwrap_or(defaults.log_filter.clone()),
        log_file: args
            .log_file
            .clone()
            .or_else(|| env(ENV_LOG_FILE).map(PathBuf::from)),
        ..defaults
    })
}

fn parse_env<T: FromStr>(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    let Some(raw) = env(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| AppError::invalid_argument(format!("Invalid {key}='{raw}': {e}")))
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Rewrite argv so `dash` defaults to `dash tui`.
///
/// Rules:
/// - `dash`                      -> `dash tui`
/// - `dash -r East ...`          -> `dash tui -r East ...`
/// - `dash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "values" | "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn args(argv: &[&str]) -> DashArgs {
        let mut full = vec!["dash", "summary"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Summary(args) => args,
            _ => unreachable!(),
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_to_tui() {
        assert_eq!(rewrite_args(strings(&["dash"])), strings(&["dash", "tui"]));
        assert_eq!(
            rewrite_args(strings(&["dash", "-r", "East"])),
            strings(&["dash", "tui", "-r", "East"])
        );
        assert_eq!(
            rewrite_args(strings(&["dash", "summary", "-r", "East"])),
            strings(&["dash", "summary", "-r", "East"])
        );
        assert_eq!(rewrite_args(strings(&["dash", "--help"])), strings(&["dash", "--help"]));
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let cfg = dash_config_with_env(&args(&[]), &no_env).unwrap();
        assert_eq!(cfg.sample_seed, 42);
        assert_eq!(cfg.sample_count, 100);
        assert_eq!(cfg.region, None);
        assert_eq!(cfg.products, None);
        assert!(cfg.plot);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn env_fills_in_missing_flags() {
        let env = |key: &str| match key {
            "DASH_SEED" => Some("7".to_string()),
            "DASH_RECORDS" => Some("250".to_string()),
            "DASH_LOG" => Some("debug".to_string()),
            _ => None,
        };
        let cfg = dash_config_with_env(&args(&["--seed", "9"]), &env).unwrap();
        assert_eq!(cfg.sample_seed, 9);
        assert_eq!(cfg.sample_count, 250);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn bad_env_value_is_invalid_argument() {
        let env = |key: &str| (key == "DASH_RECORDS").then(|| "lots".to_string());
        let err = dash_config_with_env(&args(&[]), &env).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("DASH_RECORDS"));
    }

    #[test]
    fn selection_flags_are_carried() {
        let cfg = dash_config_with_env(
            &args(&["-r", "South", "-p", "Soap,Juice", "--no-plot", "--table"]),
            &no_env,
        )
        .unwrap();
        assert_eq!(cfg.region.as_deref(), Some("South"));
        assert_eq!(cfg.products, Some(strings(&["Soap", "Juice"])));
        assert!(!cfg.plot);
        assert!(cfg.show_table);
    }
}

//! `tracing` subscriber setup.
//!
//! The CLI logs to stderr so report output on stdout stays clean. The TUI owns
//! the terminal, so it only logs when a log file is configured.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where log events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogSink {
    /// Pick a sink for a front-end that may or may not own the terminal.
    pub fn for_frontend(log_file: Option<&Path>, owns_terminal: bool) -> Self {
        match log_file {
            Some(path) => LogSink::File(path.to_path_buf()),
            None if owns_terminal => LogSink::Off,
            None => LogSink::Stderr,
        }
    }
}

pub fn parse_filter(filter: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(filter)
        .map_err(|e| AppError::invalid_argument(format!("Invalid log filter '{filter}': {e}")))
}

/// Install the global subscriber.
///
/// A second call is a no-op (the first subscriber stays installed).
pub fn init(filter: &str, sink: &LogSink) -> Result<(), AppError> {
    let env_filter = parse_filter(filter)?;

    let installed = match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::io(format!("Failed to open log file '{}': {e}", path.display())))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

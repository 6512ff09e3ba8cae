//! File-backed tracing setup. Stdout belongs to the TUI, so logs go to a file.
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result, simple_error};

/// Filter comes from `USERBOARD_LOG` (e.g. `debug`, `userboard=trace`), default `info`.
pub fn init(log_file: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_ctx(|| format!("open log file {}", log_file))?;
    let filter = EnvFilter::try_from_env("USERBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| simple_error(format!("init logging: {}", e)))
}

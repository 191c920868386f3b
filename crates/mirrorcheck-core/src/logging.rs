//! Tracing setup for the CLI.
//!
//! Records go to `$XDG_STATE_HOME/mirrorcheck/mirrorcheck.log`. When that file
//! cannot be opened the caller falls back to [`init_logging_stderr`]. Report
//! output goes to stdout and never shares a stream with the log.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,mirrorcheck=debug,mirrorcheck_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log file location; the state directory is created if missing.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mirrorcheck")?;
    xdg_dirs
        .place_state_file("mirrorcheck.log")
        .context("create log directory")
}

/// Install the global subscriber writing to [`log_path`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "mirrorcheck logging initialized");
    Ok(())
}

/// Install a stderr subscriber. A subscriber that is already set is kept.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

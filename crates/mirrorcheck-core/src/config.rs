use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::DEFAULT_INDEX_PATH;
use crate::probe::ProbeMethod;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per probe (including the first).
    pub max_attempts: u32,
    /// Fixed pause between attempts, in milliseconds.
    pub delay_ms: u64,
    /// Treat 5xx responses as transient.
    #[serde(default = "default_true")]
    pub retry_server_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            delay_ms: policy.delay.as_millis() as u64,
            retry_server_errors: policy.retry_server_errors,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            delay: Duration::from_millis(self.delay_ms),
            retry_server_errors: self.retry_server_errors,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Global configuration loaded from `~/.config/mirrorcheck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorCheckConfig {
    /// Maximum probes in flight (None = available hardware parallelism).
    #[serde(default)]
    pub max_concurrency: Option<usize>,
    /// Per-attempt request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Bound on the whole mirror fan-out in seconds (None = unbounded).
    #[serde(default)]
    pub run_timeout_secs: Option<u64>,
    /// User-Agent sent with every probe (None = built-in `mirrorcheck/<version>`).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Maximum lag behind the source before a mirror is reported outdated.
    pub stale_threshold_secs: u64,
    /// Emit a flagged block for mirrors with unsupported schemes.
    pub flag_unsupported: bool,
    /// Path probed when no target is given on the command line.
    pub index_path: String,
    /// "head" (default) or "get".
    #[serde(default)]
    pub probe_method: Option<ProbeMethod>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for MirrorCheckConfig {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            request_timeout_secs: 10,
            run_timeout_secs: None,
            user_agent: None,
            stale_threshold_secs: 7 * 24 * 60 * 60,
            flag_unsupported: true,
            index_path: DEFAULT_INDEX_PATH.to_string(),
            probe_method: None,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mirrorcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorCheckConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<MirrorCheckConfig> {
    if !path.exists() {
        let default_cfg = MirrorCheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: MirrorCheckConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

//! Engine configuration for one run.

use std::time::Duration;

use crate::cancel::CancelFlag;
use crate::config::MirrorCheckConfig;
use crate::probe::{ProbeMethod, ProbeRequest, DEFAULT_USER_AGENT};
use crate::retry::RetryPolicy;
use crate::scheduler;

/// Everything one run needs, passed explicitly into [`crate::engine::run_check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Resolve a baseline from the source and compare mirrors against it.
    pub compare_to_baseline: bool,
    /// Resource path probed on every mirror (and the source).
    pub target_path: String,
    pub required_content_type: Option<String>,
    /// Render unsupported-scheme candidates as flagged blocks.
    pub flag_unsupported: bool,
    /// Maximum tolerated lag of a mirror's `Last-Modified` behind the source's.
    pub stale_threshold: Duration,
    pub max_concurrency: usize,
    /// Bound on each probe attempt.
    pub request_timeout: Duration,
    /// Bound on the whole mirror fan-out.
    pub run_timeout: Option<Duration>,
    pub user_agent: String,
    pub method: ProbeMethod,
    pub retry: RetryPolicy,
}

/// Release index probed when no target path is given.
pub const DEFAULT_INDEX_PATH: &str = "/dists/stable/InRelease";

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            compare_to_baseline: false,
            target_path: DEFAULT_INDEX_PATH.to_string(),
            required_content_type: None,
            flag_unsupported: true,
            stale_threshold: Duration::from_secs(7 * 24 * 60 * 60),
            max_concurrency: scheduler::default_limit(),
            request_timeout: Duration::from_secs(10),
            run_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            method: ProbeMethod::Head,
            retry: RetryPolicy::default(),
        }
    }
}

impl CheckOptions {
    /// Options seeded from the config file; callers override per run.
    pub fn from_config(cfg: &MirrorCheckConfig) -> Self {
        let defaults = Self::default();
        Self {
            target_path: cfg.index_path.clone(),
            flag_unsupported: cfg.flag_unsupported,
            stale_threshold: Duration::from_secs(cfg.stale_threshold_secs),
            max_concurrency: cfg
                .max_concurrency
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_concurrency),
            request_timeout: Duration::from_secs(cfg.request_timeout_secs.max(1)),
            run_timeout: cfg.run_timeout_secs.map(Duration::from_secs),
            user_agent: cfg
                .user_agent
                .clone()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            method: cfg.probe_method.unwrap_or_default(),
            retry: cfg.retry.clone().unwrap_or_default().policy(),
            ..defaults
        }
    }

    /// Per-attempt request settings derived from these options.
    pub fn probe_request(&self) -> ProbeRequest {
        ProbeRequest {
            timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
            required_content_type: self.required_content_type.clone(),
            method: self.method,
            cancel: CancelFlag::default(),
        }
    }
}

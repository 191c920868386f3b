//! Check command: probe every mirror and write the report to stdout.

use anyhow::Result;
use mirrorcheck_core::config::MirrorCheckConfig;
use mirrorcheck_core::engine::{self, CheckOptions};
use mirrorcheck_core::mirrors;
use mirrorcheck_core::probe::CurlProber;
use mirrorcheck_core::report;
use std::io::{self, Write};
use std::sync::Arc;

use crate::cli::CheckArgs;

/// Config values overridden by whatever was given on the command line.
pub(crate) fn build_options(cfg: &MirrorCheckConfig, args: &CheckArgs) -> CheckOptions {
    let mut options = CheckOptions::from_config(cfg);
    options.compare_to_baseline = args.source.is_some();
    if let Some(target) = &args.target {
        options.target_path = target.clone();
    }
    if let Some(timeout) = args.timeout {
        options.request_timeout = timeout;
    }
    if args.run_timeout.is_some() {
        options.run_timeout = args.run_timeout;
    }
    if let Some(jobs) = args.jobs.filter(|j| *j > 0) {
        options.max_concurrency = jobs;
    }
    if let Some(retries) = args.retries {
        options.retry.max_attempts = retries.saturating_add(1);
    }
    if args.content_type.is_some() {
        options.required_content_type = args.content_type.clone();
    }
    if let Some(stale_after) = args.stale_after {
        options.stale_threshold = stale_after;
    }
    if args.skip_unsupported {
        options.flag_unsupported = false;
    }
    if let Some(method) = args.method {
        options.method = method.into();
    }
    options
}

/// Load the mirror list, run the check and print the report.
pub async fn run_check(cfg: &MirrorCheckConfig, args: &CheckArgs) -> Result<()> {
    let options = build_options(cfg, args);
    let candidates = mirrors::load_candidates(&args.mirrors)?;
    if candidates.is_empty() {
        tracing::warn!(path = %args.mirrors.display(), "mirror list has no candidates");
    }

    let report = engine::run_check(
        &options,
        Arc::new(CurlProber),
        args.source.as_deref(),
        candidates,
    )
    .await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &report, args.format, options.flag_unsupported)?;
    out.flush()?;
    Ok(())
}

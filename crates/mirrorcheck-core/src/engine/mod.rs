//! Mirror validation run: baseline → bounded fan-out → verdicts → report.

mod error;
mod options;

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::baseline::{self, Baseline};
use crate::cancel::CancelFlag;
use crate::candidate::Candidate;
use crate::probe::{self, ProbeRequest, Prober};
use crate::report::{Report, ReportEntry};
use crate::retry::with_retry;
use crate::scheduler;
use crate::verdict::{self, Verdict};

pub use error::CheckError;
pub use options::{CheckOptions, DEFAULT_INDEX_PATH};

/// Validates every candidate and returns one report entry per candidate.
///
/// In comparison mode the source is probed first and its failure aborts the
/// run. Mirror failures are recorded in the report and never returned as
/// errors. `run_timeout` bounds the baseline and the fan-out together; when it
/// fires, outstanding probes are cancelled.
pub async fn run_check(
    options: &CheckOptions,
    prober: Arc<dyn Prober>,
    source_url: Option<&str>,
    candidates: Vec<Candidate>,
) -> Result<Report, CheckError> {
    let started = Instant::now();
    let cancel = CancelFlag::new();
    let request = ProbeRequest {
        cancel: cancel.clone(),
        ..options.probe_request()
    };

    let baseline: Option<Baseline> = if options.compare_to_baseline {
        let source = source_url
            .filter(|s| !s.trim().is_empty())
            .ok_or(CheckError::MissingSource)?;
        Some(
            baseline::resolve_baseline(
                Arc::clone(&prober),
                source,
                &options.target_path,
                &request,
                &options.retry,
                options.run_timeout,
            )
            .await?,
        )
    } else {
        None
    };

    info!(
        candidates = candidates.len(),
        max_concurrency = options.max_concurrency,
        target = %options.target_path,
        compare = options.compare_to_baseline,
        "checking mirrors"
    );

    let work = {
        let target = options.target_path.clone();
        let policy = options.retry;
        move |candidate: &Candidate| {
            with_retry(&policy, &request.cancel, || {
                probe::probe(prober.as_ref(), &candidate.url, &target, &request)
            })
        }
    };
    let remaining = options
        .run_timeout
        .map(|d| d.saturating_sub(started.elapsed()));
    let dispatched = scheduler::run_all(
        candidates,
        options.max_concurrency,
        remaining,
        &cancel,
        work,
    )
    .await;

    let entries = dispatched
        .into_iter()
        .map(|(candidate, outcome)| {
            let verdict = verdict::classify(
                &candidate,
                outcome.as_ref(),
                baseline.as_ref(),
                options.stale_threshold,
            );
            log_verdict(&candidate, &verdict);
            ReportEntry { candidate, verdict }
        })
        .collect();

    let report = Report::from_entries(entries);
    let summary = report.summary();
    info!(
        total = summary.total,
        valid = summary.valid,
        stale = summary.stale,
        unreachable = summary.unreachable,
        unsupported = summary.unsupported,
        "mirror check finished"
    );
    Ok(report)
}

fn log_verdict(candidate: &Candidate, verdict: &Verdict) {
    match verdict {
        Verdict::Valid => info!(mirror = candidate.label(), url = %candidate, "valid"),
        Verdict::Unsupported => info!(url = %candidate, "unsupported protocol"),
        flagged => warn!(
            mirror = candidate.label(),
            url = %candidate,
            verdict = flagged.kind(),
            "{}",
            flagged.message()
        ),
    }
}

//! Baseline resolution: probe the canonical source once before any mirror.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::candidate::Candidate;
use crate::engine::CheckError;
use crate::probe::{self, ProbeOutcome, ProbeRequest, ProbeResult, Prober};
use crate::retry::{with_retry, RetryPolicy};

/// Expected metadata taken from the source.
pub type Baseline = ProbeResult;

/// Probes `target_path` on the source (with retry) and returns its metadata.
///
/// Any failure is fatal to a comparison run: without a baseline there is
/// nothing to compare mirrors against. When `deadline` fires first,
/// `request.cancel` is set and the baseline is reported unavailable.
pub async fn resolve_baseline(
    prober: Arc<dyn Prober>,
    source_url: &str,
    target_path: &str,
    request: &ProbeRequest,
    policy: &RetryPolicy,
    deadline: Option<Duration>,
) -> Result<Baseline, CheckError> {
    let source = Candidate::new(source_url);
    if !source.is_supported() {
        return Err(CheckError::UnsupportedSource(source.url));
    }

    let task = tokio::task::spawn_blocking({
        let base = source.url.clone();
        let target = target_path.to_string();
        let request = request.clone();
        let policy = *policy;
        move || {
            with_retry(&policy, &request.cancel, || {
                probe::probe(prober.as_ref(), &base, &target, &request)
            })
        }
    });
    let joined = match deadline {
        Some(d) => match tokio::time::timeout(d, task).await {
            Ok(joined) => joined,
            Err(_) => {
                request.cancel.cancel();
                Ok(ProbeOutcome::deadline_exceeded())
            }
        },
        None => task.await,
    };
    let outcome = joined.map_err(|e| CheckError::Join(e.to_string()))?;

    match outcome {
        ProbeOutcome::Success(baseline) => {
            info!(
                url = %source.resource_url(target_path),
                content_length = baseline.content_length,
                "baseline resolved"
            );
            Ok(baseline)
        }
        failed => {
            warn!(url = %source, error = %failed, "baseline probe failed");
            Err(CheckError::BaselineUnavailable {
                url: source.resource_url(target_path),
                reason: failed.to_string(),
            })
        }
    }
}

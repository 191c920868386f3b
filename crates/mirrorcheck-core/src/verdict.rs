//! Per-candidate verdicts: compare a probe outcome against the baseline.

use std::fmt;
use std::time::Duration;

use crate::baseline::Baseline;
use crate::candidate::Candidate;
use crate::probe::ProbeOutcome;

/// Why a reachable mirror is considered stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// Resource size differs from the source's.
    SizeMismatch { expected: u64, actual: u64 },
    /// Resource is older than the source's by more than the threshold.
    Outdated { behind: Duration },
}

impl StaleReason {
    /// Human-readable reason with numbers.
    pub fn detail(&self) -> String {
        match self {
            StaleReason::SizeMismatch { expected, actual } => format!(
                "size mismatch: source has {} bytes, mirror has {}",
                expected, actual
            ),
            StaleReason::Outdated { behind } => {
                format!("outdated: {} behind source", describe_age(*behind))
            }
        }
    }
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::SizeMismatch { .. } => f.write_str("size mismatch"),
            StaleReason::Outdated { .. } => f.write_str("outdated"),
        }
    }
}

/// Final classification of one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Stale(StaleReason),
    /// Probe failed after retries; carries the failure message.
    Unreachable(String),
    /// Scheme is not http/https; never probed.
    Unsupported,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Short machine-friendly name.
    pub fn kind(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Stale(_) => "stale",
            Verdict::Unreachable(_) => "unreachable",
            Verdict::Unsupported => "unsupported",
        }
    }

    /// Message shown to operators for this verdict.
    pub fn message(&self) -> String {
        match self {
            Verdict::Valid => "valid".to_string(),
            Verdict::Stale(reason) => reason.detail(),
            Verdict::Unreachable(detail) => detail.clone(),
            Verdict::Unsupported => "unsupported protocol".to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stale(reason) => write!(f, "stale ({})", reason),
            Verdict::Unreachable(detail) => write!(f, "unreachable ({})", detail),
            other => f.write_str(other.kind()),
        }
    }
}

/// Assigns a verdict to one candidate.
///
/// `outcome` is `None` when the candidate was never probed. With a baseline,
/// size is compared first; only a size match goes on to the freshness check,
/// which flags mirrors whose `Last-Modified` lags the baseline's by more than
/// `stale_threshold`. A mirror newer than the baseline is never outdated.
pub fn classify(
    candidate: &Candidate,
    outcome: Option<&ProbeOutcome>,
    baseline: Option<&Baseline>,
    stale_threshold: Duration,
) -> Verdict {
    let Some(outcome) = outcome.filter(|_| candidate.is_supported()) else {
        return Verdict::Unsupported;
    };

    let result = match outcome {
        ProbeOutcome::Success(result) => result,
        failed => return Verdict::Unreachable(failed.to_string()),
    };

    let Some(baseline) = baseline else {
        return Verdict::Valid;
    };

    if result.content_length != baseline.content_length {
        return Verdict::Stale(StaleReason::SizeMismatch {
            expected: baseline.content_length,
            actual: result.content_length,
        });
    }

    if let (Some(source), Some(mirror)) = (baseline.last_modified, result.last_modified) {
        if let Ok(behind) = source.duration_since(mirror) {
            if behind > stale_threshold {
                return Verdict::Stale(StaleReason::Outdated { behind });
            }
        }
    }

    Verdict::Valid
}

fn describe_age(d: Duration) -> String {
    const HOUR: u64 = 60 * 60;
    const DAY: u64 = 24 * HOUR;
    let secs = d.as_secs();
    if secs >= DAY {
        format!("{}d {}h", secs / DAY, (secs % DAY) / HOUR)
    } else if secs >= HOUR {
        format!("{}h {}m", secs / HOUR, (secs % HOUR) / 60)
    } else {
        format!("{}s", secs)
    }
}

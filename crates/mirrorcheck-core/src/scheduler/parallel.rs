//! Fan out probes for every candidate through one bounded pool.
//!
//! Candidates with a scheme the prober cannot speak are answered immediately
//! and never take a pool slot. Everything else gets exactly one task.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cancel::CancelFlag;
use crate::candidate::Candidate;
use crate::probe::ProbeOutcome;
use crate::retry::ErrorKind;

use super::pool::{BoundedPool, Completion};

/// Probe outcome for one candidate; `None` when the candidate was never
/// dispatched because its scheme is unsupported.
pub type Dispatched = (Candidate, Option<ProbeOutcome>);

/// Runs `work` for every supported candidate with at most `max_concurrency`
/// in flight and returns one entry per input candidate, in input order.
///
/// `work` must contain its own failures: whatever it returns is recorded as
/// that candidate's outcome. Candidates whose task could not finish before
/// `deadline` (or whose task panicked) are recorded as transport failures.
/// `cancel` is set when the deadline fires; `work` should stop on it.
pub async fn run_all<F>(
    candidates: Vec<Candidate>,
    max_concurrency: usize,
    deadline: Option<Duration>,
    cancel: &CancelFlag,
    work: F,
) -> Vec<Dispatched>
where
    F: Fn(&Candidate) -> ProbeOutcome + Send + Sync + 'static,
{
    let mut dispatch = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.is_supported() {
            dispatch.push((index, candidate.clone()));
        } else {
            debug!(url = %candidate, "unsupported scheme, not probing");
        }
    }

    let pool = BoundedPool::new(max_concurrency);
    let indices: Vec<usize> = dispatch.iter().map(|(i, _)| *i).collect();
    let work = Arc::new(move |(_, candidate): (usize, Candidate)| work(&candidate));
    let completions = pool.run(dispatch, deadline, cancel, work).await;

    let mut outcomes: Vec<Option<ProbeOutcome>> =
        candidates.iter().map(|_| None).collect();
    for (index, completion) in indices.into_iter().zip(completions) {
        let outcome = match completion {
            Completion::Done(outcome) => outcome,
            Completion::TimedOut => ProbeOutcome::deadline_exceeded(),
            Completion::Failed(msg) => {
                warn!(url = %candidates[index], "{}", msg);
                ProbeOutcome::Transport {
                    kind: ErrorKind::Other,
                    detail: msg,
                }
            }
        };
        outcomes[index] = Some(outcome);
    }

    candidates.into_iter().zip(outcomes).collect()
}

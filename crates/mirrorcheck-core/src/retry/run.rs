//! Retry loop: run a probe attempt until it succeeds or the policy says stop.

use tracing::debug;

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::cancel::CancelFlag;
use crate::probe::ProbeOutcome;

/// Runs `attempt` until it returns `Success` or the retry policy says to stop.
///
/// Transient failures sleep for the policy's fixed delay before the next
/// attempt; structural failures return immediately. When every attempt fails,
/// the last attempt's outcome is returned. Once `cancel` is set no further
/// attempt starts and a pending pause ends early. Blocks the current thread.
pub fn with_retry<F>(policy: &RetryPolicy, cancel: &CancelFlag, mut attempt: F) -> ProbeOutcome
where
    F: FnMut() -> ProbeOutcome,
{
    let mut n = 1u32;
    loop {
        if cancel.is_cancelled() {
            debug!(attempt = n, "probe cancelled before attempt");
            return ProbeOutcome::deadline_exceeded();
        }
        let outcome = attempt();
        let Some(kind) = classify::classify(&outcome) else {
            return outcome;
        };
        match policy.decide(n, kind) {
            RetryDecision::NoRetry => return outcome,
            RetryDecision::RetryAfter(d) => {
                debug!(attempt = n, error = %outcome, "probe failed, retrying");
                if !cancel.sleep(d) {
                    return ProbeOutcome::deadline_exceeded();
                }
                n += 1;
            }
        }
    }
}

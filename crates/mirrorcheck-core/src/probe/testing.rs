//! In-process prober for engine tests: scripted outcomes per mirror, with
//! call recording and an in-flight counter. The optional delay honours the
//! request's cancel flag like a real transfer would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::{ProbeOutcome, ProbeRequest, ProbeResult, Prober};
use crate::retry::ErrorKind;

struct Rule {
    base: String,
    script: Vec<ProbeOutcome>,
    served: usize,
}

pub(crate) struct ScriptedProber {
    rules: Mutex<Vec<Rule>>,
    requested: Mutex<Vec<String>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

pub(crate) fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

pub(crate) fn success(len: u64, modified_secs: u64) -> ProbeOutcome {
    ProbeOutcome::Success(ProbeResult {
        content_length: len,
        last_modified: Some(at(modified_secs)),
        content_type: None,
    })
}

pub(crate) fn timed_out() -> ProbeOutcome {
    ProbeOutcome::Transport {
        kind: ErrorKind::Timeout,
        detail: "operation timed out".to_string(),
    }
}

impl ScriptedProber {
    pub(crate) fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Every probe sleeps this long before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers with `outcomes` in order for URLs under `base`; the last one repeats.
    pub(crate) fn script(self, base: &str, outcomes: Vec<ProbeOutcome>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            base: base.trim_end_matches('/').to_string(),
            script: outcomes,
            served: 0,
        });
        self
    }

    pub(crate) fn outcome(self, base: &str, outcome: ProbeOutcome) -> Self {
        self.script(base, vec![outcome])
    }

    pub(crate) fn reachable(self, base: &str, len: u64, modified_secs: u64) -> Self {
        self.outcome(base, success(len, modified_secs))
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, base: &str) -> usize {
        let base = base.trim_end_matches('/');
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter(|u| under(u, base))
            .count()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

fn under(url: &str, base: &str) -> bool {
    url == base || url.starts_with(&format!("{}/", base))
}

impl Prober for ScriptedProber {
    fn probe(&self, url: &str, request: &ProbeRequest) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());

        if !request.cancel.sleep(self.delay) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return ProbeOutcome::deadline_exceeded();
        }

        let outcome = {
            let mut rules = self.rules.lock().unwrap();
            match rules.iter_mut().find(|r| under(url, &r.base)) {
                Some(rule) if !rule.script.is_empty() => {
                    let i = rule.served.min(rule.script.len() - 1);
                    rule.served += 1;
                    rule.script[i].clone()
                }
                _ => ProbeOutcome::Transport {
                    kind: ErrorKind::Connection,
                    detail: format!("could not resolve host for {}", url),
                },
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

//! Aggregated run results.
//!
//! A [`Report`] holds exactly one entry per input candidate, sorted by URL
//! (stable, so duplicate URLs keep their input order). Completion order of
//! the probes never leaks into the report.

mod render;

use serde::Serialize;

use crate::candidate::Candidate;
use crate::verdict::Verdict;

pub use render::{render, write_report, ReportFormat};

/// One candidate and its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub candidate: Candidate,
    pub verdict: Verdict,
}

impl ReportEntry {
    pub fn severity(&self) -> Severity {
        Severity::of(&self.verdict)
    }
}

/// How loudly a verdict should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Notice,
    Warning,
    Error,
}

impl Severity {
    pub fn of(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Valid => Severity::Info,
            Verdict::Unsupported => Severity::Notice,
            Verdict::Stale(_) => Severity::Warning,
            Verdict::Unreachable(_) => Severity::Error,
        }
    }
}

/// Counts per verdict kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub valid: usize,
    pub stale: usize,
    pub unreachable: usize,
    pub unsupported: usize,
}

impl ReportSummary {
    /// Candidates that need operator attention (everything but valid).
    pub fn flagged(&self) -> usize {
        self.total - self.valid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Builds a report, sorting entries by candidate URL.
    pub fn from_entries(mut entries: Vec<ReportEntry>) -> Self {
        entries.sort_by(|a, b| a.candidate.url.cmp(&b.candidate.url));
        Self { entries }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verdict of the first entry with this URL.
    pub fn verdict_for(&self, url: &str) -> Option<&Verdict> {
        self.entries
            .iter()
            .find(|e| e.candidate.url == url)
            .map(|e| &e.verdict)
    }

    /// Entries that belong in rendered output: every non-valid entry, minus
    /// unsupported ones unless `flag_unsupported` is set.
    pub fn flagged(&self, flag_unsupported: bool) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| match e.verdict {
            Verdict::Valid => false,
            Verdict::Unsupported => flag_unsupported,
            _ => true,
        })
    }

    pub fn summary(&self) -> ReportSummary {
        let mut s = ReportSummary {
            total: self.entries.len(),
            ..ReportSummary::default()
        };
        for e in &self.entries {
            match e.verdict {
                Verdict::Valid => s.valid += 1,
                Verdict::Stale(_) => s.stale += 1,
                Verdict::Unreachable(_) => s.unreachable += 1,
                Verdict::Unsupported => s.unsupported += 1,
            }
        }
        s
    }
}

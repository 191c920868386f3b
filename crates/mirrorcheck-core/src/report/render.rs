//! Render a report for its consumer.
//!
//! `Css` produces the stylesheet the mirror list page includes to highlight
//! broken mirrors; `JsonLines` is the same information as records; `Text` is
//! a terminal listing of every candidate.

use std::fmt::Write as _;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Report, ReportEntry, Severity};
use crate::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Css,
    #[serde(rename = "jsonl")]
    JsonLines,
    Text,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(ReportFormat::Css),
            "jsonl" | "json" => Ok(ReportFormat::JsonLines),
            "text" => Ok(ReportFormat::Text),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Foreground/background marker colors for a flagged entry.
fn colors(verdict: &Verdict) -> (&'static str, &'static str) {
    match verdict {
        Verdict::Stale(_) => ("black", "yellow"),
        Verdict::Unsupported => ("white", "silver"),
        Verdict::Valid | Verdict::Unreachable(_) => ("white", "gray"),
    }
}

fn css_block(out: &mut String, entry: &ReportEntry) {
    let url = &entry.candidate.url;
    let (fg, bg) = colors(&entry.verdict);
    let _ = writeln!(out, "/* url: {} msg: {} */", url, entry.verdict.message());
    let _ = writeln!(
        out,
        "a[href=\"{}\"] {{ padding: 3px; color: {}; background-color: {}; }}",
        url, fg, bg
    );
    out.push('\n');
}

#[derive(Serialize)]
struct Record<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    verdict: &'static str,
    message: String,
    severity: Severity,
}

fn json_line(out: &mut String, entry: &ReportEntry) {
    let record = Record {
        url: &entry.candidate.url,
        name: entry.candidate.name.as_deref(),
        verdict: entry.verdict.kind(),
        message: entry.verdict.message(),
        severity: entry.severity(),
    };
    // Serializing plain strings and enums cannot fail.
    if let Ok(line) = serde_json::to_string(&record) {
        out.push_str(&line);
        out.push('\n');
    }
}

fn text(out: &mut String, report: &Report) {
    let width = report
        .entries()
        .iter()
        .map(|e| e.candidate.url.len())
        .max()
        .unwrap_or(0);
    for e in report.entries() {
        let _ = writeln!(
            out,
            "{:<11} {:<width$}  {}",
            e.verdict.kind(),
            e.candidate.url,
            if e.verdict.is_valid() {
                String::new()
            } else {
                e.verdict.message()
            },
            width = width
        );
    }
    let s = report.summary();
    let _ = writeln!(
        out,
        "{} mirrors: {} valid, {} stale, {} unreachable, {} unsupported",
        s.total, s.valid, s.stale, s.unreachable, s.unsupported
    );
}

/// Render `report` as a string.
pub fn render(report: &Report, format: ReportFormat, flag_unsupported: bool) -> String {
    let mut out = String::new();
    match format {
        ReportFormat::Css => report
            .flagged(flag_unsupported)
            .for_each(|e| css_block(&mut out, e)),
        ReportFormat::JsonLines => report
            .flagged(flag_unsupported)
            .for_each(|e| json_line(&mut out, e)),
        ReportFormat::Text => text(&mut out, report),
    }
    out
}

/// Render `report` into `w`.
pub fn write_report<W: io::Write>(
    w: &mut W,
    report: &Report,
    format: ReportFormat,
    flag_unsupported: bool,
) -> io::Result<()> {
    w.write_all(render(report, format, flag_unsupported).as_bytes())?;
    w.flush()
}

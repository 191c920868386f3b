//! Mirror list input.
//!
//! Two formats are understood: a markdown document whose first table links
//! to the mirrors, and a JSON list of mirror sources. Files ending in `.json`
//! are read as the latter; everything else as markdown.

mod markdown;
mod source;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::candidate::Candidate;

pub use markdown::links_from_markdown;
pub use source::{parse_mirror_sources, MirrorSource};

/// Read candidates from a mirror list file.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let data =
        fs::read(path).with_context(|| format!("read mirror list: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let candidates: Vec<Candidate> = if is_json {
        parse_mirror_sources(&data)?
            .into_iter()
            .map(Candidate::from)
            .collect()
    } else {
        let text = String::from_utf8_lossy(&data);
        links_from_markdown(&text)
            .into_iter()
            .map(Candidate::new)
            .collect()
    };

    tracing::debug!(
        path = %path.display(),
        count = candidates.len(),
        "loaded mirror candidates"
    );
    Ok(candidates)
}

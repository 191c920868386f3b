//! JSON mirror list: `[{"id", "name", "url", ...}]`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::candidate::Candidate;

/// One entry of a JSON mirror list. Only `url` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub name_locale: HashMap<String, String>,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub country: String,
    /// Milliseconds.
    #[serde(default)]
    pub adjust_delay: i64,
}

impl From<MirrorSource> for Candidate {
    fn from(m: MirrorSource) -> Self {
        let name = if m.name.is_empty() { m.id } else { m.name };
        Candidate::named(m.url, name)
    }
}

/// Parse a JSON mirror list.
pub fn parse_mirror_sources(data: &[u8]) -> Result<Vec<MirrorSource>> {
    serde_json::from_slice(data).context("unmarshal mirror source file")
}

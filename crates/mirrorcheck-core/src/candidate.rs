//! Mirror candidates and effective resource URLs.
//!
//! A candidate is one mirror base URL as read from the mirror list. Only
//! `http` and `https` candidates are ever probed; everything else (ftp,
//! rsync, relative links, garbage) is classified without touching the network.

use std::fmt;
use url::Url;

/// Schemes the prober knows how to talk to.
const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// One mirror endpoint, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Base URL exactly as listed (no normalization besides trimming whitespace).
    pub url: String,
    /// Display name from the mirror list, if it carried one.
    pub name: Option<String>,
}

impl Candidate {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into().trim().to_string(),
            name: None,
        }
    }

    pub fn named(url: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: (!name.trim().is_empty()).then(|| name.trim().to_string()),
            ..Self::new(url)
        }
    }

    /// Lowercased scheme, or `None` when the URL does not parse as absolute.
    pub fn scheme(&self) -> Option<String> {
        Url::parse(&self.url).ok().map(|u| u.scheme().to_string())
    }

    /// True if this candidate may be probed (absolute `http`/`https` URL).
    pub fn is_supported(&self) -> bool {
        self.scheme()
            .map(|s| SUPPORTED_SCHEMES.contains(&s.as_str()))
            .unwrap_or(false)
    }

    /// Name for log lines: the display name if present, otherwise the URL.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }

    /// URL of `target_path` on this mirror.
    pub fn resource_url(&self, target_path: &str) -> String {
        resource_url(&self.url, target_path)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Joins a mirror base URL and a target path.
///
/// Trailing slashes on `base` are dropped and exactly one `/` separates the
/// two parts, so `https://m.example/debian/` + `/dists/stable/InRelease` and
/// `https://m.example/debian` + `dists/stable/InRelease` yield the same URL.
/// An empty target probes the base URL itself.
pub fn resource_url(base: &str, target_path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let target = target_path.trim();
    if target.is_empty() {
        return base.to_string();
    }
    if target.starts_with('/') {
        format!("{}{}", base, target)
    } else {
        format!("{}/{}", base, target)
    }
}

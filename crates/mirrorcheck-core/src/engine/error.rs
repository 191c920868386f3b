//! Errors that abort a whole run. Per-mirror failures are never errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The source could not be probed, so there is nothing to compare against.
    #[error("baseline unavailable from {url}: {reason}")]
    BaselineUnavailable { url: String, reason: String },
    /// Comparison mode was requested without a source URL.
    #[error("comparison against a baseline requires a source URL")]
    MissingSource,
    #[error("source URL {0} does not use http or https")]
    UnsupportedSource(String),
    /// The blocking baseline probe task panicked.
    #[error("baseline probe task failed: {0}")]
    Join(String),
}

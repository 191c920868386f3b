//! Probe results and outcome classification.

use std::fmt;
use std::time::SystemTime;

use crate::retry::ErrorKind;

/// Metadata extracted from one successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// `Content-Length` in bytes (0 when the server omitted it).
    pub content_length: u64,
    /// Parsed `Last-Modified`.
    pub last_modified: Option<SystemTime>,
    /// Raw `Content-Type` header value.
    pub content_type: Option<String>,
}

/// Result of a single probe attempt against one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(ProbeResult),
    /// The request never produced a usable response (DNS, connect, timeout, TLS).
    Transport { kind: ErrorKind, detail: String },
    /// Final response status was not 200.
    HttpStatus(u32),
    /// A header needed to verify freshness was absent or unparseable.
    MissingMetadata(String),
    /// A content type was required and the response carried a different one.
    ContentTypeMismatch {
        expected: String,
        actual: Option<String>,
    },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    pub fn result(&self) -> Option<&ProbeResult> {
        match self {
            ProbeOutcome::Success(r) => Some(r),
            _ => None,
        }
    }

    /// Outcome recorded for a probe the scheduler had to abandon.
    pub fn deadline_exceeded() -> Self {
        ProbeOutcome::Transport {
            kind: ErrorKind::Timeout,
            detail: "run deadline exceeded".to_string(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success(r) => write!(f, "ok ({} bytes)", r.content_length),
            ProbeOutcome::Transport { detail, .. } => f.write_str(detail),
            ProbeOutcome::HttpStatus(code) => write!(f, "HTTP {}", code),
            ProbeOutcome::MissingMetadata(what) => f.write_str(what),
            ProbeOutcome::ContentTypeMismatch { expected, actual } => write!(
                f,
                "content type mismatch: expected {}, got {}",
                expected,
                actual.as_deref().unwrap_or("none")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(ProbeOutcome::HttpStatus(404).to_string(), "HTTP 404");
        assert_eq!(
            ProbeOutcome::ContentTypeMismatch {
                expected: "application/x-iso9660-image".into(),
                actual: Some("text/html".into()),
            }
            .to_string(),
            "content type mismatch: expected application/x-iso9660-image, got text/html"
        );
        assert_eq!(
            ProbeOutcome::deadline_exceeded().to_string(),
            "run deadline exceeded"
        );
    }
}

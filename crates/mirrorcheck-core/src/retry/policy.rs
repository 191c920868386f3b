use std::time::Duration;

/// High-level classification of a failed probe for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Attempt timed out (connect or total).
    Timeout,
    /// Network-level failure (DNS, refused, reset, nothing received).
    Connection,
    /// Any other transport failure reported by the HTTP client (TLS, protocol).
    Transport,
    /// Server is overloaded (503).
    Throttled,
    /// Other server-side status (5xx).
    Http5xx(u16),
    /// Structural failure: client status, missing metadata, wrong content type.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-attempt retry policy with a constant pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Zero behaves as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
    /// Whether 5xx responses count as transient.
    pub retry_server_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
            retry_server_errors: true,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Decide whether attempt number `attempt` (1-based) that failed with
    /// `kind` should be followed by another one.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts.max(1) {
            return RetryDecision::NoRetry;
        }

        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Throttled | ErrorKind::Http5xx(_) if !self.retry_server_errors => {
                RetryDecision::NoRetry
            }
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Transport
            | ErrorKind::Throttled
            | ErrorKind::Http5xx(_) => RetryDecision::RetryAfter(self.delay),
        }
    }
}

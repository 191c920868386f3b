//! Retry policy for probe attempts.
//!
//! Error classification (timeouts, connection failures, server errors) and
//! the fixed-delay retry decision live here so the baseline resolver and the
//! mirror fan-out share one policy.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::with_retry;

//! HTTP metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers for one resource
//! on one mirror, then classifies the response into a [`ProbeOutcome`]:
//! status, `Last-Modified`, `Content-Length` and optionally `Content-Type`.
//! The response body is never read.

mod outcome;
mod parse;
#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};
use std::str;
use std::time::Duration;
use tracing::debug;

use crate::cancel::CancelFlag;
use crate::retry::classify_curl_error;

pub use outcome::{ProbeOutcome, ProbeResult};

/// Default user agent. Several mirrors reject requests with an empty one.
pub const DEFAULT_USER_AGENT: &str = concat!("mirrorcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP method used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// HEAD, falling back to a header-only GET on 405/501.
    #[default]
    Head,
    /// GET aborted at the first body byte.
    Get,
}

/// Per-attempt request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Bound on a single attempt (connect + headers).
    pub timeout: Duration,
    pub user_agent: String,
    /// Media type the response must declare, if any.
    pub required_content_type: Option<String>,
    pub method: ProbeMethod,
    /// Set when the run is abandoned; in-flight transfers abort.
    pub cancel: CancelFlag,
}

impl Default for ProbeRequest {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            required_content_type: None,
            method: ProbeMethod::Head,
            cancel: CancelFlag::default(),
        }
    }
}

/// Something that can probe a resource URL. Implementations block the
/// calling thread; the scheduler runs them on tokio's blocking pool.
pub trait Prober: Send + Sync {
    fn probe(&self, url: &str, request: &ProbeRequest) -> ProbeOutcome;
}

/// Probes `target_path` on the mirror at `base_url` (one attempt).
pub fn probe(
    prober: &dyn Prober,
    base_url: &str,
    target_path: &str,
    request: &ProbeRequest,
) -> ProbeOutcome {
    let url = crate::candidate::resource_url(base_url, target_path);
    prober.probe(&url, request)
}

/// libcurl-backed prober. Each call uses a fresh easy handle, so no
/// connection state is shared between concurrent probes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlProber;

impl Prober for CurlProber {
    fn probe(&self, url: &str, request: &ProbeRequest) -> ProbeOutcome {
        if request.cancel.is_cancelled() {
            return ProbeOutcome::deadline_exceeded();
        }
        let response = match request.method {
            ProbeMethod::Head => match fetch_headers(url, request, false) {
                Ok(r) if r.status == 405 || r.status == 501 => {
                    debug!(url, status = r.status, "HEAD rejected, retrying as GET");
                    fetch_headers(url, request, true)
                }
                other => other,
            },
            ProbeMethod::Get => fetch_headers(url, request, true),
        };

        match response {
            Ok(r) => parse::classify_response(
                r.status,
                &r.headers,
                request.required_content_type.as_deref(),
            ),
            Err(e) if request.cancel.is_cancelled() => {
                debug!(url, error = %e, "probe aborted by cancel");
                ProbeOutcome::deadline_exceeded()
            }
            Err(e) => ProbeOutcome::Transport {
                kind: classify_curl_error(&e),
                detail: e.to_string(),
            },
        }
    }
}

/// Final status code and the header lines of the final response.
struct RawResponse {
    status: u32,
    headers: Vec<String>,
}

/// Performs one request and collects the final response's headers.
///
/// Follows redirects; header lines are reset at every status line so only the
/// last hop is kept. For GET the transfer is aborted at the first body byte.
/// The progress callback aborts the transfer once `request.cancel` is set.
fn fetch_headers(
    url: &str,
    request: &ProbeRequest,
    get: bool,
) -> Result<RawResponse, curl::Error> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    if get {
        easy.get(true)?;
    } else {
        easy.nobody(true)?; // HEAD request
    }
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&request.user_agent)?;
    easy.connect_timeout(request.timeout)?;
    easy.timeout(request.timeout)?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                if line.starts_with("HTTP/") {
                    headers.clear();
                }
                headers.push(line.to_string());
            }
            true
        })?;
        // Refusing the first chunk makes libcurl stop and close the connection.
        transfer.write_function(|_| Ok(0))?;
        transfer.progress_function(|_, _, _, _| !request.cancel.is_cancelled())?;
        match transfer.perform() {
            Ok(()) => {}
            Err(e) if get && e.is_write_error() => {}
            Err(e) => return Err(e),
        }
    }

    let status = easy.response_code()?;
    Ok(RawResponse { status, headers })
}

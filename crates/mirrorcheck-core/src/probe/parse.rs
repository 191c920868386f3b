//! Parse HTTP response header lines and classify the response.

use crate::probe::{ProbeOutcome, ProbeResult};

/// Header values the probe cares about, as raw strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ResponseHeaders {
    pub content_length: Option<u64>,
    pub last_modified: Option<String>,
    pub content_type: Option<String>,
}

/// Parse collected header lines. Lines without a colon (status lines,
/// blank separators) are skipped.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut parsed = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            if let Ok(n) = value.parse::<u64>() {
                parsed.content_length = Some(n);
            }
        } else if name.eq_ignore_ascii_case("last-modified") {
            parsed.last_modified = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-type") {
            parsed.content_type = Some(value.to_string());
        }
    }

    parsed
}

/// Media type without parameters, lowercased (`Text/HTML; charset=utf-8` → `text/html`).
pub(crate) fn media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Turn a final status code and its header lines into a probe outcome.
///
/// Checks run in order: status must be 200, `Last-Modified` must be present
/// and parse as an HTTP date, and the media type must match
/// `required_content_type` when one is given.
pub(crate) fn classify_response(
    status: u32,
    lines: &[String],
    required_content_type: Option<&str>,
) -> ProbeOutcome {
    if status != 200 {
        return ProbeOutcome::HttpStatus(status);
    }

    let headers = parse_headers(lines);

    let Some(raw) = headers.last_modified else {
        return ProbeOutcome::MissingMetadata("missing Last-Modified header".to_string());
    };
    let last_modified = match httpdate::parse_http_date(&raw) {
        Ok(t) => t,
        Err(_) => {
            return ProbeOutcome::MissingMetadata(format!("unparseable Last-Modified: {}", raw))
        }
    };

    if let Some(expected) = required_content_type {
        let matches = headers
            .content_type
            .as_deref()
            .map(|actual| media_type(actual) == media_type(expected))
            .unwrap_or(false);
        if !matches {
            return ProbeOutcome::ContentTypeMismatch {
                expected: expected.to_string(),
                actual: headers.content_type,
            };
        }
    }

    ProbeOutcome::Success(ProbeResult {
        content_length: headers.content_length.unwrap_or(0),
        last_modified: Some(last_modified),
        content_type: headers.content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_length_date_and_type() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "content-length: 12345",
            "Last-Modified: Wed, 21 Oct 2015 07:28:00 GMT",
            "Content-Type: application/octet-stream",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert_eq!(
            r.last_modified.as_deref(),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
        assert_eq!(r.content_type.as_deref(), Some("application/octet-stream"));
    }

    #[test]
    fn parse_headers_ignores_bad_length() {
        let r = parse_headers(&lines(&["Content-Length: lots"]));
        assert!(r.content_length.is_none());
    }

    #[test]
    fn non_200_is_status_error() {
        assert_eq!(
            classify_response(404, &[], None),
            ProbeOutcome::HttpStatus(404)
        );
        assert_eq!(
            classify_response(206, &[], None),
            ProbeOutcome::HttpStatus(206)
        );
    }

    #[test]
    fn missing_or_bad_last_modified() {
        let outcome = classify_response(200, &lines(&["Content-Length: 1"]), None);
        assert!(matches!(outcome, ProbeOutcome::MissingMetadata(_)));

        let outcome = classify_response(200, &lines(&["Last-Modified: yesterday"]), None);
        match outcome {
            ProbeOutcome::MissingMetadata(msg) => assert!(msg.contains("yesterday")),
            other => panic!("expected MissingMetadata, got {:?}", other),
        }
    }

    #[test]
    fn success_carries_metadata() {
        let outcome = classify_response(
            200,
            &lines(&[
                "Content-Length: 1000",
                "Last-Modified: Thu, 01 Jan 1970 00:16:40 GMT",
            ]),
            None,
        );
        let r = outcome.result().expect("success").clone();
        assert_eq!(r.content_length, 1000);
        assert_eq!(r.last_modified, Some(UNIX_EPOCH + Duration::from_secs(1000)));
    }

    #[test]
    fn missing_length_is_zero() {
        let outcome = classify_response(
            200,
            &lines(&["Last-Modified: Thu, 01 Jan 1970 00:16:40 GMT"]),
            None,
        );
        assert_eq!(outcome.result().map(|r| r.content_length), Some(0));
    }

    #[test]
    fn content_type_compares_media_type_only() {
        let hdrs = lines(&[
            "Last-Modified: Thu, 01 Jan 1970 00:16:40 GMT",
            "Content-Type: Text/Plain; charset=utf-8",
        ]);
        assert!(classify_response(200, &hdrs, Some("text/plain")).is_success());
        assert_eq!(
            classify_response(200, &hdrs, Some("application/pgp-signature")),
            ProbeOutcome::ContentTypeMismatch {
                expected: "application/pgp-signature".into(),
                actual: Some("Text/Plain; charset=utf-8".into()),
            }
        );
    }

    #[test]
    fn required_content_type_missing_header() {
        let hdrs = lines(&["Last-Modified: Thu, 01 Jan 1970 00:16:40 GMT"]);
        assert!(matches!(
            classify_response(200, &hdrs, Some("text/plain")),
            ProbeOutcome::ContentTypeMismatch { actual: None, .. }
        ));
    }
}

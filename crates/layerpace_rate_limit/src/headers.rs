//! Parsing of the rate-limit response headers.

use crate::ThrottleConfig;
use layerpace_core::HttpResponse;
use std::time::Duration;
use tracing::debug;

/// Rate-limit state reported by one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitHeaders {
    remaining: u64,
    window: Duration,
    locked: bool,
}

impl RateLimitHeaders {
    /// Read the remaining-quota and interval headers from `response`.
    ///
    /// Both headers must be present and hold non-negative integers, otherwise
    /// `None` is returned and the response carries no usable signal. The
    /// window counts as locked when no quota remains or when the status is
    /// `429 Too Many Requests`, whatever the headers say.
    pub fn parse(response: &HttpResponse, config: &ThrottleConfig) -> Option<Self> {
        let remaining = parse_header_u64(response, config.remaining_header())?;
        let interval = parse_header_u64(response, config.interval_header())?;

        let headers = Self {
            remaining,
            window: Duration::from_secs(interval),
            locked: remaining == 0 || response.is_too_many_requests(),
        };
        debug!(
            remaining,
            interval_secs = interval,
            locked = headers.locked,
            "Parsed rate limit headers"
        );
        Some(headers)
    }

    /// Quota left in the current window.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Window length reported by the server.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether the window is exhausted.
    pub fn locked(&self) -> bool {
        self.locked
    }
}

fn parse_header_u64(response: &HttpResponse, name: &str) -> Option<u64> {
    let value = response.header_str(name)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(header = name, value, error = %e, "Ignoring malformed rate limit header");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

    fn response(status: StatusCode, entries: &[(&str, &str)]) -> HttpResponse {
        let mut headers = HeaderMap::new();
        for (key, value) in entries {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        HttpResponse::from_parts(status, headers, Vec::new())
    }

    #[test]
    fn test_exhausted_quota_is_locked() {
        let parsed = RateLimitHeaders::parse(
            &response(
                StatusCode::OK,
                &[("x-ratelimit-remaining", "0"), ("x-ratelimit-interval", "60")],
            ),
            &ThrottleConfig::default(),
        )
        .unwrap();

        assert!(parsed.locked());
        assert_eq!(parsed.remaining(), 0);
        assert_eq!(parsed.window(), Duration::from_secs(60));
    }

    #[test]
    fn test_remaining_quota_is_unlocked() {
        let parsed = RateLimitHeaders::parse(
            &response(
                StatusCode::OK,
                &[("x-ratelimit-remaining", "42"), ("x-ratelimit-interval", "10")],
            ),
            &ThrottleConfig::default(),
        )
        .unwrap();

        assert!(!parsed.locked());
        assert_eq!(parsed.window(), Duration::from_secs(10));
    }

    #[test]
    fn test_too_many_requests_overrides_remaining() {
        let parsed = RateLimitHeaders::parse(
            &response(
                StatusCode::TOO_MANY_REQUESTS,
                &[("x-ratelimit-remaining", "3"), ("x-ratelimit-interval", "10")],
            ),
            &ThrottleConfig::default(),
        )
        .unwrap();

        assert!(parsed.locked());
    }

    #[test]
    fn test_missing_or_malformed_headers() {
        let config = ThrottleConfig::default();
        let cases: [&[(&str, &str)]; 4] = [
            &[],
            &[("x-ratelimit-remaining", "0")],
            &[("x-ratelimit-interval", "10")],
            &[("x-ratelimit-remaining", "none"), ("x-ratelimit-interval", "10")],
        ];
        for entries in cases {
            assert!(
                RateLimitHeaders::parse(&response(StatusCode::OK, entries), &config).is_none(),
                "{entries:?}"
            );
        }

        let negative = response(
            StatusCode::OK,
            &[("x-ratelimit-remaining", "-1"), ("x-ratelimit-interval", "10")],
        );
        assert!(RateLimitHeaders::parse(&negative, &config).is_none());
    }

    #[test]
    fn test_custom_header_names() {
        let config = ThrottleConfig::builder()
            .remaining_header("RateLimit-Remaining")
            .interval_header("RateLimit-Window")
            .build()
            .unwrap();
        let parsed = RateLimitHeaders::parse(
            &response(
                StatusCode::OK,
                &[("ratelimit-remaining", "0"), ("ratelimit-window", "10")],
            ),
            &config,
        )
        .unwrap();

        assert!(parsed.locked());
    }
}

//! Tests for throttle configuration loading.

use layerpace_rate_limit::ThrottleConfig;
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_bundled_defaults() {
    let config = ThrottleConfig::load().unwrap();

    assert_eq!(config.api_marker(), "/api/");
    assert_eq!(config.average_window(), Duration::from_secs(60));
    assert_eq!(config.burst_window(), Duration::from_secs(10));
    assert_eq!(config.remaining_header(), "X-Ratelimit-Remaining");
    assert_eq!(config.interval_header(), "X-Ratelimit-Interval");
}

#[test]
fn test_from_file_overrides_and_falls_back() {
    let file = write_config(
        r#"
        burst_window_secs = 5
        max_attempts = 12
        "#,
    );

    let config = ThrottleConfig::from_file(file.path()).unwrap();

    assert_eq!(config.burst_window(), Duration::from_secs(5));
    assert_eq!(config.max_attempts(), &Some(12));
    // Untouched values keep their defaults.
    assert_eq!(config.average_window(), Duration::from_secs(60));
    assert_eq!(config.api_marker(), "/api/");
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let file = write_config("average_window_secs = 10\nburst_window_secs = 10\n");

    let err = ThrottleConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("must differ"), "{err}");
}

#[test]
fn test_from_file_missing_file() {
    assert!(ThrottleConfig::from_file("/nonexistent/layerpace.toml").is_err());
}

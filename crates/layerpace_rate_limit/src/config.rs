//! Configuration for the throttled transport.
//!
//! The throttle learns the current rate-limit state from response headers,
//! but it still needs to know which header names to read, which URL marker
//! precedes the resource type, and which window lengths identify each tier.
//!
//! Sources, in order of precedence (later sources override earlier):
//! 1. Bundled defaults (include_str! from layerpace.toml)
//! 2. `~/.config/layerpace/layerpace.toml`
//! 3. `./layerpace.toml`
//! 4. `LAYERPACE_*` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use layerpace_error::{BuilderError, ConfigError, LayerpaceResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../layerpace.toml");

/// Settings for a [`ThrottledTransport`](crate::ThrottledTransport).
///
/// # Example
///
/// ```
/// use layerpace_rate_limit::ThrottleConfig;
/// use std::time::Duration;
///
/// let config = ThrottleConfig::builder()
///     .burst_window_secs(5u64)
///     .max_attempts(10u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.burst_window(), Duration::from_secs(5));
/// assert_eq!(config.average_window(), Duration::from_secs(60));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default, setter(into), build_fn(private, name = "build_internal"))]
#[serde(default)]
pub struct ThrottleConfig {
    /// Path segment that precedes the resource type, e.g. `/api/`.
    api_marker: String,

    /// Window length reported for the global average tier.
    average_window_secs: u64,

    /// Window length reported for the per-key burst tier.
    burst_window_secs: u64,

    /// Header carrying the remaining quota in the current window.
    remaining_header: String,

    /// Header carrying the window length in seconds.
    interval_header: String,

    /// Give up retrying after this many lockout responses in a row.
    ///
    /// `None` retries until the server stops answering 429.
    #[builder(setter(into, strip_option))]
    max_attempts: Option<u32>,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            api_marker: "/api/".to_string(),
            average_window_secs: 60,
            burst_window_secs: 10,
            remaining_header: "X-Ratelimit-Remaining".to_string(),
            interval_header: "X-Ratelimit-Interval".to_string(),
            max_attempts: None,
        }
    }
}

impl ThrottleConfigBuilder {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration fails [`ThrottleConfig::validate`].
    pub fn build(&self) -> Result<ThrottleConfig, BuilderError> {
        let config = self
            .build_internal()
            .map_err(|e| BuilderError::validation_failed(e))?;
        config
            .validate()
            .map_err(|e| BuilderError::validation_failed(e.message))?;
        Ok(config)
    }
}

impl ThrottleConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ThrottleConfigBuilder {
        ThrottleConfigBuilder::default()
    }

    /// Window length identifying the average tier.
    pub fn average_window(&self) -> Duration {
        Duration::from_secs(self.average_window_secs)
    }

    /// Window length identifying the burst tier.
    pub fn burst_window(&self) -> Duration {
        Duration::from_secs(self.burst_window_secs)
    }

    /// Check the configuration for values the throttle cannot work with.
    ///
    /// # Errors
    ///
    /// Returns error if a window is zero, both windows are equal (tiers could
    /// not be told apart), the marker is not delimited by `/`, a header name
    /// is empty, or `max_attempts` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average_window_secs == 0 || self.burst_window_secs == 0 {
            return Err(ConfigError::new("window lengths must be positive"));
        }
        if self.average_window_secs == self.burst_window_secs {
            return Err(ConfigError::new(format!(
                "average and burst windows must differ, both are {}s",
                self.average_window_secs
            )));
        }
        if self.api_marker.len() < 2
            || !self.api_marker.starts_with('/')
            || !self.api_marker.ends_with('/')
        {
            return Err(ConfigError::new(format!(
                "api_marker must be a path segment like \"/api/\", got {:?}",
                self.api_marker
            )));
        }
        if self.remaining_header.is_empty() || self.interval_header.is_empty() {
            return Err(ConfigError::new("rate limit header names must not be empty"));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::new("max_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration from a specific file path.
    ///
    /// Values missing from the file fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> LayerpaceResult<Self> {
        debug!("Loading throttle configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed or the merged
    /// result fails validation.
    #[instrument]
    pub fn load() -> LayerpaceResult<Self> {
        debug!("Loading throttle configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/layerpace/layerpace.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("layerpace").required(false))
            .add_source(Environment::with_prefix("LAYERPACE").try_parsing(true));

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(?config, "Loaded throttle configuration");
        Ok(config)
    }
}

//! Header-driven throttling for a two-tier rate-limited API.
//!
//! The remote service enforces two fixed-window limits at once:
//! - an **average** limit shared by every request, and
//! - a **burst** limit per resource type and HTTP method.
//!
//! Neither limit is configured up front. [`ThrottledTransport`] reads the
//! `X-Ratelimit-Remaining` and `X-Ratelimit-Interval` headers of every
//! response, tells the tiers apart by their window length, and waits for the
//! reconstructed window boundary before sending once a limit is exhausted.
//! Responses with status `429` are retried transparently.
//!
//! ```rust,ignore
//! use layerpace_rate_limit::{ThrottleConfig, ThrottledTransport};
//!
//! let transport = ThrottledTransport::with_config(base, ThrottleConfig::load()?);
//! let response = transport.execute(&request).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod headers;
mod routing;
mod throttle;
mod tier;
mod tracker;

pub use config::{ThrottleConfig, ThrottleConfigBuilder, ThrottleConfigBuilderError};
pub use headers::RateLimitHeaders;
pub use routing::{BurstTable, RoutingKey};
pub use throttle::ThrottledTransport;
pub use tier::RateLimitTier;
pub use tracker::{WindowSnapshot, WindowTracker};

//! layerpace - adaptive outbound throttling for two-tier rate-limited APIs
//!
//! layerpace wraps an HTTP transport so outgoing requests stay within a
//! remote service's global average limit and its per-resource, per-operation
//! burst limit. Both limits are learned from response headers, and lockout
//! responses are retried transparently.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use layerpace::{HttpRequest, ReqwestTransport, ThrottleConfig, ThrottledTransport, Transport};
//! use reqwest::{Method, Url};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = ReqwestTransport::new().with_bearer_token(std::env::var("LAYERPACE_TOKEN")?);
//!     let transport = ThrottledTransport::with_config(base, ThrottleConfig::load()?);
//!
//!     let url = Url::parse("https://yourdomain.commercelayer.io/api/skus")?;
//!     let response = transport.execute(&HttpRequest::new(Method::GET, url)).await?;
//!     println!("{}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `layerpace_error` - Error types
//! - `layerpace_core` - Request/response envelope, `Transport` trait, reqwest transport
//! - `layerpace_rate_limit` - Window trackers, header parsing, the throttled transport
//!
//! This crate re-exports everything for convenience.

pub use layerpace_core::*;
pub use layerpace_error::*;
pub use layerpace_rate_limit::*;

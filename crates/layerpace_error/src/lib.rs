//! Error types for the layerpace workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Rate-limit lockouts are deliberately absent from this hierarchy. The
//! throttled transport absorbs them and only ever reports transport,
//! configuration, or builder failures.
//!
//! # Examples
//!
//! ```
//! use layerpace_error::{HttpError, LayerpaceResult};
//!
//! fn send() -> LayerpaceResult<u16> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(send().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{LayerpaceError, LayerpaceErrorKind, LayerpaceResult};
pub use http::HttpError;

//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, HttpError};

/// Every error condition surfaced by the layerpace crates.
///
/// # Examples
///
/// ```
/// use layerpace_error::{HttpError, LayerpaceError, LayerpaceErrorKind};
///
/// let err: LayerpaceError = HttpError::new("Connection reset").into();
/// assert!(matches!(err.kind(), LayerpaceErrorKind::Http(_)));
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LayerpaceErrorKind {
    /// Underlying transport failed to produce a response
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Layerpace error with kind discrimination.
///
/// # Examples
///
/// ```
/// use layerpace_error::{ConfigError, LayerpaceResult};
///
/// fn load() -> LayerpaceResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Layerpace Error: {}", _0)]
pub struct LayerpaceError(Box<LayerpaceErrorKind>);

impl LayerpaceError {
    /// Create a new error from a kind.
    pub fn new(kind: LayerpaceErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LayerpaceErrorKind {
        &self.0
    }

    /// True when the error came from the underlying transport.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind(), LayerpaceErrorKind::Http(_))
    }
}

// Generic From implementation for any type that converts to LayerpaceErrorKind
impl<T> From<T> for LayerpaceError
where
    T: Into<LayerpaceErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for layerpace operations.
pub type LayerpaceResult<T> = std::result::Result<T, LayerpaceError>;

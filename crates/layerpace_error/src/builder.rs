//! Errors from building request envelopes and throttle configuration.

use std::fmt::Display;

/// What went wrong while building a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A field was set from input that could not be parsed
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Why the input was rejected
        reason: String,
    },

    /// The assembled value broke an invariant
    #[display("Validation failed: {}", _0)]
    ValidationFailed(String),
}

/// Builder error with the location that raised it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A required builder field was left unset.
    #[track_caller]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::MissingField(field.into()))
    }

    /// `field` could not be parsed from user input.
    #[track_caller]
    pub fn invalid_field(field: impl Into<String>, reason: impl Display) -> Self {
        Self::new(BuilderErrorKind::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        })
    }

    /// The built value failed validation.
    #[track_caller]
    pub fn validation_failed(reason: impl Display) -> Self {
        Self::new(BuilderErrorKind::ValidationFailed(reason.to_string()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }

    /// Source line that raised the error.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source file that raised the error.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

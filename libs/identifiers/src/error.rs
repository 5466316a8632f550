//! Error types for identifier construction, extraction, and URI rendering.

use thiserror::Error;

/// Errors that can occur when building or converting identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// A mandatory construction argument is missing or inconsistent.
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A value's textual form could not be parsed as a URI reference.
    #[error("malformed URI '{value}': {reason}")]
    MalformedUri { value: String, reason: String },

    /// An extractor refused to process its input.
    #[error("unsuitable input for extraction: {0}")]
    UnsuitableInput(String),

    /// A declarative type definition could not be parsed or built.
    #[error("invalid type definition: {0}")]
    InvalidDefinition(String),
}

impl IdentifierError {
    /// Shorthand for an absent mandatory field.
    pub(crate) fn missing(field: &'static str) -> Self {
        IdentifierError::InvalidArgument {
            field,
            reason: "must be present".to_string(),
        }
    }

    /// Returns true if this error was raised by a constructor.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, IdentifierError::InvalidArgument { .. })
    }

    /// Returns true if this error came from URI conversion.
    pub fn is_malformed_uri(&self) -> bool {
        matches!(self, IdentifierError::MalformedUri { .. })
    }
}

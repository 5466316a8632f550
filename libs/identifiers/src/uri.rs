//! URI rendering of whole values.
//!
//! Identity rarely depends on where an object is stored, so most
//! identifiers render as *relative* URI references. Absolute URIs,
//! including URNs, are allowed.

use std::fmt;

use iri_string::types::{UriReferenceStr, UriReferenceString, UriStr};

use crate::IdentifierError;

/// A URI reference produced from a whole value.
///
/// Values that already are URI references are passed through by
/// reference; everything else is parsed into an owned reference.
#[derive(Debug, Clone)]
pub enum UriRepresentation<'a> {
    /// The whole value itself, not re-parsed.
    Borrowed(&'a UriReferenceStr),
    /// A reference parsed from the whole value's textual form.
    Owned(UriReferenceString),
}

impl UriRepresentation<'_> {
    /// The URI reference.
    #[must_use]
    pub fn as_uri_ref(&self) -> &UriReferenceStr {
        match self {
            UriRepresentation::Borrowed(uri) => uri,
            UriRepresentation::Owned(uri) => uri.as_slice(),
        }
    }

    /// The URI reference as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.as_uri_ref().as_str()
    }

    /// Returns true if the whole value was passed through unchanged.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, UriRepresentation::Borrowed(_))
    }

    /// Returns true if this is an absolute URI (it has a scheme).
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        UriStr::new(self.as_str()).is_ok()
    }
}

impl PartialEq for UriRepresentation<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for UriRepresentation<'_> {}

impl fmt::Display for UriRepresentation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `text` as an RFC 3986 URI reference.
pub fn parse_uri(text: &str) -> Result<UriReferenceString, IdentifierError> {
    UriReferenceString::try_from(text.to_string()).map_err(|e| IdentifierError::MalformedUri {
        value: text.to_string(),
        reason: e.to_string(),
    })
}

/// Conversion of a whole value into a URI reference.
///
/// The default policy for most types parses the value's textual form;
/// implement this trait on a custom whole-value type to render it
/// differently.
pub trait UriRepresentable {
    /// Renders `self` as a URI reference.
    fn to_uri_representation(&self) -> Result<UriRepresentation<'_>, IdentifierError>;
}

impl UriRepresentable for UriReferenceString {
    fn to_uri_representation(&self) -> Result<UriRepresentation<'_>, IdentifierError> {
        Ok(UriRepresentation::Borrowed(self.as_slice()))
    }
}

impl UriRepresentable for String {
    fn to_uri_representation(&self) -> Result<UriRepresentation<'_>, IdentifierError> {
        parse_uri(self).map(UriRepresentation::Owned)
    }
}

macro_rules! uri_from_display {
    ($($ty:ty),+) => {
        $(
            impl UriRepresentable for $ty {
                fn to_uri_representation(&self) -> Result<UriRepresentation<'_>, IdentifierError> {
                    parse_uri(&self.to_string()).map(UriRepresentation::Owned)
                }
            }
        )+
    };
}

uri_from_display!(i32, i64, u32, u64, ulid::Ulid);

/// UUIDs render as absolute `urn:uuid:` URNs.
impl UriRepresentable for uuid::Uuid {
    fn to_uri_representation(&self) -> Result<UriRepresentation<'_>, IdentifierError> {
        parse_uri(&self.urn().to_string()).map(UriRepresentation::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_value_passes_through() {
        let uri = parse_uri("accounts/1234").unwrap();
        let rendered = uri.to_uri_representation().unwrap();
        assert!(rendered.is_borrowed());
        assert!(std::ptr::eq(
            rendered.as_str().as_ptr(),
            uri.as_slice().as_str().as_ptr()
        ));
    }

    #[test]
    fn test_text_parsed_as_relative_reference() {
        let text = "aaaabbbb".to_string();
        let rendered = text.to_uri_representation().unwrap();
        assert!(!rendered.is_borrowed());
        assert!(!rendered.is_absolute());
        assert_eq!(rendered.as_str(), "aaaabbbb");
    }

    #[test]
    fn test_percent_encoded_text_accepted() {
        let text = "test%20".to_string();
        let rendered = text.to_uri_representation().unwrap();
        assert_eq!(rendered.to_string(), "test%20");
    }

    #[test]
    fn test_malformed_text_rejected() {
        let text = "has space".to_string();
        let err = text.to_uri_representation().unwrap_err();
        assert!(err.is_malformed_uri());
        assert!(matches!(
            err,
            IdentifierError::MalformedUri { ref value, .. } if value == "has space"
        ));
    }

    #[test]
    fn test_uuid_renders_as_urn() {
        let id = uuid::Uuid::nil();
        let rendered = id.to_uri_representation().unwrap();
        assert!(rendered.is_absolute());
        assert_eq!(
            rendered.as_str(),
            "urn:uuid:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_integer_renders_as_digits() {
        let rendered = 42_i64.to_uri_representation().unwrap();
        assert_eq!(rendered.as_str(), "42");
    }
}

//! # typed-identifiers
//!
//! Typed, named identifiers whose raw values carry extractable parts.
//!
//! ## Design Principles
//!
//! - An identifier is a whole value plus shared, immutable type metadata
//! - Metadata indexes pluggable extractors by arbitrary keys
//! - Equality is structural: equal metadata and equal values mean equal
//!   identifiers, whatever instances they came from
//! - Unknown extractor keys and absent inputs are not errors; they yield
//!   no part
//!
//! ## Example
//!
//! An account number whose first four characters name a fund:
//!
//! ```ignore
//! let account_id = TextTypeMetadata::with_extractor("AccountID", "fund".to_string(), RangeExtractor::new(0, 4))?
//!     .shared();
//! let id = Identifier::new(account_id, "12345678".to_string());
//!
//! assert_eq!(id.extract_from("fund")?, Some("1234".to_string()));
//! assert_eq!(id.to_string(), "AccountID (text): 12345678");
//! ```

mod definition;
mod error;
mod extractor;
mod identifier;
mod intern;
mod macros;
mod metadata;
mod range;
mod text;
mod type_tag;
mod uri;

pub use definition::{TextTypeDefinition, TypeCatalog};
pub use error::IdentifierError;
pub use extractor::{share, ErasedExtractor, Extractor, ExtractorMap, SharedExtractor};
pub use identifier::{Identifier, IdentifierBuilder};
pub use intern::IdentifierInterner;
pub use metadata::{MetadataKind, TypeMetadata, TypeMetadataBuilder};
pub use range::RangeExtractor;
pub use text::TextTypeMetadata;
pub use type_tag::{TypeTag, WholeValue};
pub use uri::{parse_uri, UriRepresentable, UriRepresentation};

/// Re-export of the URI reference types used for URI rendering.
pub use iri_string::types::{UriReferenceStr, UriReferenceString};

//! Identifiers: a whole value paired with its shared type metadata.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::uri::{UriRepresentable, UriRepresentation};
use crate::{IdentifierError, TypeMetadata};

/// An immutable identifier.
///
/// Everything about the identifier except its value lives in the shared
/// [`TypeMetadata`]; extraction is delegated to it.
///
/// # Example
///
/// ```ignore
/// let account_id = TypeMetadata::named_with_extractor("AccountID", "fund".to_string(), RangeExtractor::new(0, 4));
/// let id = Identifier::new(Arc::new(account_id), "12345678".to_string());
/// assert_eq!(id.extract_from("fund")?, Some("1234".to_string()));
/// ```
pub struct Identifier<W, P, K = String> {
    metadata: Arc<TypeMetadata<W, P, K>>,
    value: W,
}

impl<W, P, K> Identifier<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    /// Creates a new identifier.
    #[must_use]
    pub fn new(metadata: Arc<TypeMetadata<W, P, K>>, value: W) -> Self {
        Self { metadata, value }
    }

    /// Starts building an identifier whose fields are checked at build time.
    #[must_use]
    pub fn builder() -> IdentifierBuilder<W, P, K> {
        IdentifierBuilder::default()
    }

    /// Returns an identifier equal to one built from `metadata` and `value`.
    ///
    /// The result may be a previously built instance; callers must rely on
    /// equality, never on identity. See
    /// [`IdentifierInterner`](crate::IdentifierInterner) for a caching
    /// variant.
    #[must_use]
    pub fn normalize(metadata: Arc<TypeMetadata<W, P, K>>, value: W) -> Self {
        Self::new(metadata, value)
    }

    /// The whole value.
    #[must_use]
    pub fn value(&self) -> &W {
        &self.value
    }

    /// The shared type metadata.
    #[must_use]
    pub fn type_metadata(&self) -> &Arc<TypeMetadata<W, P, K>> {
        &self.metadata
    }

    /// Extracts the part registered under `key` from this identifier's
    /// value. Unknown keys yield `Ok(None)`.
    pub fn extract_from<Q>(&self, key: &Q) -> Result<Option<P>, IdentifierError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.metadata.extract_from(key, Some(&self.value))
    }

    /// Every key usable with [`extract_from`](Self::extract_from).
    #[must_use]
    pub fn extractor_keys(&self) -> HashSet<K> {
        self.metadata.extractor_keys()
    }

    /// Renders this identifier's value as a URI reference.
    pub fn to_uri_representation(&self) -> Result<Option<UriRepresentation<'_>>, IdentifierError>
    where
        W: UriRepresentable,
    {
        self.metadata.to_uri_representation(Some(&self.value))
    }
}

impl<W: Clone, P, K> Clone for Identifier<W, P, K> {
    fn clone(&self) -> Self {
        Self {
            metadata: Arc::clone(&self.metadata),
            value: self.value.clone(),
        }
    }
}

impl<W, P, K> PartialEq for Identifier<W, P, K>
where
    W: PartialEq + 'static,
    P: 'static,
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && (Arc::ptr_eq(&self.metadata, &other.metadata) || self.metadata == other.metadata)
    }
}

impl<W: Eq + 'static, P: 'static, K: Eq + Hash> Eq for Identifier<W, P, K> {}

impl<W, P, K> Hash for Identifier<W, P, K>
where
    W: Hash + 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.metadata.hash(state);
    }
}

impl<W: fmt::Debug, P, K: fmt::Debug> fmt::Debug for Identifier<W, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier")
            .field("metadata", &self.metadata)
            .field("value", &self.value)
            .finish()
    }
}

/// `AccountID (text): 12345678`
impl<W: fmt::Display, P, K> fmt::Display for Identifier<W, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.metadata, self.value)
    }
}

impl<W: Serialize, P, K> Serialize for Identifier<W, P, K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Identifier", 2)?;
        state.serialize_field("type", &self.metadata.to_string())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds an [`Identifier`], rejecting absent fields.
pub struct IdentifierBuilder<W, P, K = String> {
    metadata: Option<Arc<TypeMetadata<W, P, K>>>,
    value: Option<W>,
}

impl<W, P, K> Default for IdentifierBuilder<W, P, K> {
    fn default() -> Self {
        Self {
            metadata: None,
            value: None,
        }
    }
}

impl<W, P, K> IdentifierBuilder<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    /// Sets the shared type metadata. Required.
    #[must_use]
    pub fn metadata(mut self, metadata: Arc<TypeMetadata<W, P, K>>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the whole value. Required.
    #[must_use]
    pub fn value(mut self, value: W) -> Self {
        self.value = Some(value);
        self
    }

    /// Builds the identifier.
    ///
    /// Fails with [`IdentifierError::InvalidArgument`] if the metadata or
    /// the value is absent.
    pub fn build(self) -> Result<Identifier<W, P, K>, IdentifierError> {
        let metadata = self
            .metadata
            .ok_or_else(|| IdentifierError::missing("metadata"))?;
        let value = self.value.ok_or_else(|| IdentifierError::missing("value"))?;
        Ok(Identifier::new(metadata, value))
    }
}

// =============================================================================
// Tests
// =============================================================================

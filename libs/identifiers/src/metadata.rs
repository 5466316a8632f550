//! Shared, immutable type metadata.
//!
//! A [`TypeMetadata`] describes everything about an identifier except its
//! value: the kind of whole value it holds ([`TypeTag`]), an optional
//! display name, and extractors indexed by arbitrary keys. Metadata is
//! built once and shared by `Arc` between every identifier of that type.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::extractor::{share, ExtractorMap, SharedExtractor};
use crate::uri::{UriRepresentable, UriRepresentation};
use crate::{Extractor, IdentifierError, TypeTag, WholeValue};

/// The concrete flavor of a [`TypeMetadata`].
///
/// Metadata of different kinds never compare equal, even when every other
/// field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetadataKind {
    /// Plain metadata over any whole-value type.
    #[default]
    General,
    /// Named metadata over text, see [`TextTypeMetadata`](crate::TextTypeMetadata).
    Text,
}

/// Describes the type of an identifier's value and how to extract parts
/// from it.
///
/// - `W` is the whole-value type (`String`, `i64`, `Uuid`, ...)
/// - `P` is the common type of parts extracted from a whole
/// - `K` is the extractor key type
pub struct TypeMetadata<W, P, K = String> {
    kind: MetadataKind,
    type_tag: TypeTag,
    name: Option<String>,
    extractors: ExtractorMap<W, P, K>,
}

impl<W, P, K> TypeMetadata<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    /// Starts building metadata with an explicit type tag.
    #[must_use]
    pub fn builder() -> TypeMetadataBuilder<W, P, K> {
        TypeMetadataBuilder::default()
    }

    /// Creates anonymous metadata without extractors.
    #[must_use]
    pub fn new() -> Self
    where
        W: WholeValue,
    {
        Self::from_parts(MetadataKind::General, TypeTag::of::<W>(), None, HashMap::new())
    }

    /// Creates named metadata without extractors.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self
    where
        W: WholeValue,
    {
        Self::from_parts(
            MetadataKind::General,
            TypeTag::of::<W>(),
            Some(name.into()),
            HashMap::new(),
        )
    }

    /// Creates anonymous metadata with a single extractor.
    #[must_use]
    pub fn with_extractor<E>(key: K, extractor: E) -> Self
    where
        W: WholeValue,
        E: Extractor<W, P> + Eq + Hash + 'static,
    {
        let mut extractors = HashMap::new();
        extractors.insert(key, share(extractor));
        Self::from_parts(MetadataKind::General, TypeTag::of::<W>(), None, extractors)
    }

    /// Creates named metadata with a single extractor.
    #[must_use]
    pub fn named_with_extractor<E>(name: impl Into<String>, key: K, extractor: E) -> Self
    where
        W: WholeValue,
        E: Extractor<W, P> + Eq + Hash + 'static,
    {
        let mut extractors = HashMap::new();
        extractors.insert(key, share(extractor));
        Self::from_parts(
            MetadataKind::General,
            TypeTag::of::<W>(),
            Some(name.into()),
            extractors,
        )
    }

    /// Creates metadata from a keyed collection of extractors.
    ///
    /// The collection is copied; later changes to `extractors` do not
    /// affect the returned metadata.
    #[must_use]
    pub fn with_extractors(name: Option<String>, extractors: &ExtractorMap<W, P, K>) -> Self
    where
        W: WholeValue,
    {
        Self::from_parts(
            MetadataKind::General,
            TypeTag::of::<W>(),
            name,
            extractors.clone(),
        )
    }

    fn from_parts(
        kind: MetadataKind,
        type_tag: TypeTag,
        name: Option<String>,
        extractors: ExtractorMap<W, P, K>,
    ) -> Self {
        tracing::debug!(
            kind = ?kind,
            type_tag = %type_tag,
            name = name.as_deref(),
            extractors = extractors.len(),
            "built type metadata"
        );
        Self {
            kind,
            type_tag,
            name,
            extractors,
        }
    }

    /// The tag of the whole-value type.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this is general or text metadata.
    #[must_use]
    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    /// Number of registered extractors.
    #[must_use]
    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    /// Returns the extractor registered under `key`, if any.
    pub fn extractor_for<Q>(&self, key: &Q) -> Option<&SharedExtractor<W, P>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.extractors.get(key)
    }

    /// Returns a snapshot of every registered extractor key.
    #[must_use]
    pub fn extractor_keys(&self) -> HashSet<K> {
        self.extractors.keys().cloned().collect()
    }

    /// Extracts a part from `whole` with the extractor registered under
    /// `key`.
    ///
    /// An unknown key yields `Ok(None)`; otherwise the extractor's result
    /// is returned as is.
    pub fn extract_from<Q>(&self, key: &Q, whole: Option<&W>) -> Result<Option<P>, IdentifierError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        match self.extractor_for(key) {
            Some(extractor) => extractor.extract_from(whole),
            None => {
                tracing::trace!(key = ?key, type_name = self.name(), "no extractor registered");
                Ok(None)
            }
        }
    }

    /// Renders `value` as a URI reference.
    ///
    /// An absent value renders as `None`. A value that already is a URI
    /// reference is returned by reference; anything else goes through its
    /// [`UriRepresentable`] policy.
    pub fn to_uri_representation<'v>(
        &self,
        value: Option<&'v W>,
    ) -> Result<Option<UriRepresentation<'v>>, IdentifierError>
    where
        W: UriRepresentable,
    {
        value.map(UriRepresentable::to_uri_representation).transpose()
    }

    fn extractors_digest(&self) -> u64 {
        // Entry hashes are summed so the digest does not depend on map order.
        self.extractors.iter().fold(0u64, |digest, (key, extractor)| {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            extractor.hash(&mut hasher);
            digest.wrapping_add(hasher.finish())
        })
    }
}

impl<W: WholeValue, P: 'static, K: Eq + Hash + Clone> Default for TypeMetadata<W, P, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, P, K: Clone> Clone for TypeMetadata<W, P, K> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            type_tag: self.type_tag,
            name: self.name.clone(),
            extractors: self.extractors.clone(),
        }
    }
}

impl<W, P, K> PartialEq for TypeMetadata<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.type_tag == other.type_tag
            && self.extractors == other.extractors
    }
}

impl<W: 'static, P: 'static, K: Eq + Hash> Eq for TypeMetadata<W, P, K> {}

impl<W, P, K> Hash for TypeMetadata<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.name.hash(state);
        self.type_tag.hash(state);
        state.write_u64(self.extractors_digest());
    }
}

impl<W, P, K: fmt::Debug> fmt::Debug for TypeMetadata<W, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMetadata")
            .field("kind", &self.kind)
            .field("type_tag", &self.type_tag)
            .field("name", &self.name)
            .field("extractors", &self.extractors)
            .finish()
    }
}

/// `AccountID (text)`, or `(text)` for anonymous metadata.
impl<W, P, K> fmt::Display for TypeMetadata<W, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        write!(f, "({})", self.type_tag)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`TypeMetadata`], validating mandatory fields.
pub struct TypeMetadataBuilder<W, P, K = String> {
    kind: MetadataKind,
    type_tag: Option<TypeTag>,
    name: Option<String>,
    extractors: ExtractorMap<W, P, K>,
}

impl<W, P, K> Default for TypeMetadataBuilder<W, P, K> {
    fn default() -> Self {
        Self {
            kind: MetadataKind::General,
            type_tag: None,
            name: None,
            extractors: HashMap::new(),
        }
    }
}

impl<W, P, K> TypeMetadataBuilder<W, P, K>
where
    W: 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    pub(crate) fn kind(mut self, kind: MetadataKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the whole-value type tag. Required.
    #[must_use]
    pub fn type_tag(mut self, type_tag: TypeTag) -> Self {
        self.type_tag = Some(type_tag);
        self
    }

    /// Sets the display name. Optional, except for text metadata.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Registers `extractor` under `key`, replacing any previous one.
    #[must_use]
    pub fn extractor<E>(self, key: K, extractor: E) -> Self
    where
        E: Extractor<W, P> + Eq + Hash + 'static,
    {
        self.shared_extractor(key, share(extractor))
    }

    /// Registers an already shared extractor under `key`.
    #[must_use]
    pub fn shared_extractor(mut self, key: K, extractor: SharedExtractor<W, P>) -> Self {
        self.extractors.insert(key, extractor);
        self
    }

    /// Copies every entry of `extractors` into the builder.
    #[must_use]
    pub fn extractors(mut self, extractors: &ExtractorMap<W, P, K>) -> Self {
        self.extractors
            .extend(extractors.iter().map(|(k, e)| (k.clone(), e.clone())));
        self
    }

    /// Builds the metadata.
    ///
    /// Fails with [`IdentifierError::InvalidArgument`] if the type tag is
    /// absent or describes a type other than `W`.
    pub fn build(self) -> Result<TypeMetadata<W, P, K>, IdentifierError> {
        let type_tag = self
            .type_tag
            .ok_or_else(|| IdentifierError::missing("type_tag"))?;
        if !type_tag.describes::<W>() {
            return Err(IdentifierError::InvalidArgument {
                field: "type_tag",
                reason: format!("'{type_tag}' does not describe the whole-value type"),
            });
        }
        if self.kind == MetadataKind::Text
            && self.name.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(IdentifierError::missing("name"));
        }
        Ok(TypeMetadata::from_parts(
            self.kind,
            type_tag,
            self.name,
            self.extractors,
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================

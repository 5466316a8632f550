//! Named metadata for text identifiers.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::extractor::ExtractorMap;
use crate::metadata::MetadataKind;
use crate::{Extractor, IdentifierError, TypeMetadata, TypeTag};

/// [`TypeMetadata`] fixed to `String` wholes, tagged `text`.
///
/// A name is mandatory. Text metadata never equals general metadata with
/// the same fields.
pub struct TextTypeMetadata<P = String, K = String> {
    inner: TypeMetadata<String, P, K>,
}

impl<P: 'static, K: Eq + Hash + Clone> TextTypeMetadata<P, K> {
    /// Creates text metadata without extractors.
    ///
    /// Fails with [`IdentifierError::InvalidArgument`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::with_extractors(name, &HashMap::new())
    }

    /// Creates text metadata with a single extractor.
    pub fn with_extractor<E>(name: impl Into<String>, key: K, extractor: E) -> Result<Self, IdentifierError>
    where
        E: Extractor<String, P> + Eq + Hash + 'static,
    {
        let inner = TypeMetadata::builder()
            .kind(MetadataKind::Text)
            .type_tag(TypeTag::text())
            .name(name)
            .extractor(key, extractor)
            .build()?;
        Ok(Self { inner })
    }

    /// Creates text metadata from a keyed collection of extractors, copying
    /// the collection.
    pub fn with_extractors(
        name: impl Into<String>,
        extractors: &ExtractorMap<String, P, K>,
    ) -> Result<Self, IdentifierError> {
        let inner = TypeMetadata::builder()
            .kind(MetadataKind::Text)
            .type_tag(TypeTag::text())
            .name(name)
            .extractors(extractors)
            .build()?;
        Ok(Self { inner })
    }

    /// The name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name().unwrap_or_default()
    }

    /// Unwraps into the general metadata it specializes.
    #[must_use]
    pub fn into_inner(self) -> TypeMetadata<String, P, K> {
        self.inner
    }

    /// Wraps into the shared form identifiers hold.
    #[must_use]
    pub fn shared(self) -> Arc<TypeMetadata<String, P, K>> {
        Arc::new(self.inner)
    }
}

impl<P: 'static, K: Eq + Hash + Clone> Deref for TextTypeMetadata<P, K> {
    type Target = TypeMetadata<String, P, K>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<P: 'static, K: Eq + Hash + Clone> From<TextTypeMetadata<P, K>> for TypeMetadata<String, P, K> {
    fn from(metadata: TextTypeMetadata<P, K>) -> Self {
        metadata.inner
    }
}

impl<P, K: Clone> Clone for TextTypeMetadata<P, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: 'static, K: Eq + Hash> PartialEq for TextTypeMetadata<P, K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<P: 'static, K: Eq + Hash> Eq for TextTypeMetadata<P, K> {}

impl<P: 'static, K: Eq + Hash + Clone> Hash for TextTypeMetadata<P, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<P, K: fmt::Debug> fmt::Debug for TextTypeMetadata<P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextTypeMetadata").field(&self.inner).finish()
    }
}

impl<P, K> fmt::Display for TextTypeMetadata<P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

//! The extraction capability and its type-erased, shareable form.
//!
//! An [`Extractor`] pulls a *part* out of a *whole*. Type metadata stores
//! extractors behind [`SharedExtractor`] so that differently-typed
//! strategies can live in one keyed map while still comparing and hashing
//! structurally.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::IdentifierError;

/// Pulls a sub-value (the part) out of a larger value (the whole).
///
/// Implementations must return `Ok(None)` for an absent whole. They may
/// return [`IdentifierError::UnsuitableInput`] when the whole cannot be
/// meaningfully processed.
pub trait Extractor<W: ?Sized, P>: fmt::Debug + Send + Sync {
    /// Extracts the part from `whole`.
    fn extract_from(&self, whole: Option<&W>) -> Result<Option<P>, IdentifierError>;
}

/// Object-safe extension of [`Extractor`] carrying structural equality and
/// hashing.
///
/// Implemented automatically for every `Extractor + Eq + Hash + 'static`;
/// there is no need to implement it by hand.
pub trait ErasedExtractor<W: ?Sized, P>: Extractor<W, P> {
    /// The concrete extractor, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another erased extractor.
    fn dyn_eq(&self, other: &dyn ErasedExtractor<W, P>) -> bool;

    /// Hashes the concrete type and then the value.
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<W, P, T> ErasedExtractor<W, P> for T
where
    W: ?Sized + 'static,
    P: 'static,
    T: Extractor<W, P> + Eq + Hash + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn ErasedExtractor<W, P>) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl<W: ?Sized + 'static, P: 'static> PartialEq for dyn ErasedExtractor<W, P> {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl<W: ?Sized + 'static, P: 'static> Eq for dyn ErasedExtractor<W, P> {}

impl<W: ?Sized + 'static, P: 'static> Hash for dyn ErasedExtractor<W, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

/// An extractor shared between every metadata that registers it.
pub type SharedExtractor<W, P> = Arc<dyn ErasedExtractor<W, P>>;

/// Extractors indexed by arbitrary keys.
pub type ExtractorMap<W, P, K = String> = HashMap<K, SharedExtractor<W, P>>;

/// Erases a concrete extractor into a [`SharedExtractor`].
pub fn share<W, P, E>(extractor: E) -> SharedExtractor<W, P>
where
    W: ?Sized + 'static,
    P: 'static,
    E: Extractor<W, P> + Eq + Hash + 'static,
{
    Arc::new(extractor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RangeExtractor;
    use std::collections::hash_map::DefaultHasher;

    /// Upper-cases the whole; rejects anything that isn't ASCII.
    #[derive(Debug, PartialEq, Eq, Hash)]
    struct AsciiUpper;

    impl Extractor<String, String> for AsciiUpper {
        fn extract_from(&self, whole: Option<&String>) -> Result<Option<String>, IdentifierError> {
            match whole {
                None => Ok(None),
                Some(text) if text.is_ascii() => Ok(Some(text.to_ascii_uppercase())),
                Some(text) => Err(IdentifierError::UnsuitableInput(format!(
                    "'{text}' is not ASCII"
                ))),
            }
        }
    }

    fn hash_of(extractor: &SharedExtractor<String, String>) -> u64 {
        let mut hasher = DefaultHasher::new();
        extractor.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_shared_extractors_compare_structurally() {
        let a: SharedExtractor<String, String> = share(RangeExtractor::new(0, 4));
        let b: SharedExtractor<String, String> = share(RangeExtractor::new(0, 4));
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(*a == *b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_different_extractor_types_never_equal() {
        let range: SharedExtractor<String, String> = share(RangeExtractor::new(0, 4));
        let upper: SharedExtractor<String, String> = share(AsciiUpper);
        assert!(*range != *upper);
        assert!(*upper != *range);
    }

    #[test]
    fn test_custom_extractor_error_policy() {
        let upper: SharedExtractor<String, String> = share(AsciiUpper);
        assert_eq!(upper.extract_from(None), Ok(None));
        assert_eq!(
            upper.extract_from(Some(&"abc".to_string())),
            Ok(Some("ABC".to_string()))
        );
        let err = upper
            .extract_from(Some(&"äbc".to_string()))
            .unwrap_err();
        assert!(matches!(err, IdentifierError::UnsuitableInput(_)));
    }
}

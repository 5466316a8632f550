//! IdentifierInterner: hands out one shared instance per distinct identifier.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use crate::{Identifier, TypeMetadata};

/// Thread-safe content-addressed cache of identifiers using `DashMap`.
///
/// Equal `(metadata, value)` pairs normalize to the same `Arc`. Nothing
/// depends on this for correctness: an interned identifier is always equal
/// to a freshly built one.
///
/// Entries, and the metadata they hold, stay alive until they are dropped
/// with [`remove`](Self::remove) or [`clear`](Self::clear).
pub struct IdentifierInterner<W, P, K = String> {
    identifiers: DashMap<Identifier<W, P, K>, Arc<Identifier<W, P, K>>>,
}

impl<W, P, K> IdentifierInterner<W, P, K>
where
    W: Eq + Hash + Clone + 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    /// Create an empty interner.
    pub fn new() -> Self {
        Self {
            identifiers: DashMap::new(),
        }
    }

    /// Returns the shared identifier equal to one built from `metadata`
    /// and `value`, building and caching it on first request.
    pub fn normalize(&self, metadata: Arc<TypeMetadata<W, P, K>>, value: W) -> Arc<Identifier<W, P, K>> {
        let candidate = Identifier::normalize(metadata, value);
        if let Some(existing) = self.identifiers.get(&candidate) {
            return Arc::clone(existing.value());
        }
        let entry = self
            .identifiers
            .entry(candidate.clone())
            .or_insert_with(|| {
                tracing::trace!(type_name = candidate.type_metadata().name(), "interned identifier");
                Arc::new(candidate)
            });
        Arc::clone(entry.value())
    }

    /// Number of distinct identifiers held.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns true if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Drops the cached identifier equal to `identifier`, returning it if
    /// it was held. Outstanding `Arc`s stay valid.
    pub fn remove(&self, identifier: &Identifier<W, P, K>) -> Option<Arc<Identifier<W, P, K>>> {
        self.identifiers.remove(identifier).map(|(_, shared)| shared)
    }

    /// Drop every cached identifier. Previously returned `Arc`s stay valid.
    pub fn clear(&self) {
        self.identifiers.clear();
    }
}

impl<W, P, K> Default for IdentifierInterner<W, P, K>
where
    W: Eq + Hash + Clone + 'static,
    P: 'static,
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RangeExtractor;

    fn account_type() -> Arc<TypeMetadata<String, String>> {
        Arc::new(TypeMetadata::named_with_extractor(
            "AccountID",
            "fund".to_string(),
            RangeExtractor::new(0, 4),
        ))
    }

    #[test]
    fn test_equal_requests_share_instance() {
        let interner = IdentifierInterner::new();
        let a = interner.normalize(account_type(), "12345678".to_string());
        let b = interner.normalize(account_type(), "12345678".to_string());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_distinct_values_distinct_instances() {
        let interner = IdentifierInterner::new();
        let a = interner.normalize(account_type(), "12345678".to_string());
        let b = interner.normalize(account_type(), "87654321".to_string());
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_interned_equals_fresh() {
        let interner = IdentifierInterner::new();
        let interned = interner.normalize(account_type(), "12345678".to_string());
        let fresh = Identifier::new(account_type(), "12345678".to_string());
        assert_eq!(*interned, fresh);
        assert_eq!(interned.extract_from("fund").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_clear_keeps_outstanding_handles() {
        let interner = IdentifierInterner::new();
        let a = interner.normalize(account_type(), "12345678".to_string());
        interner.clear();
        assert!(interner.is_empty());
        assert_eq!(a.value(), "12345678");

        let b = interner.normalize(account_type(), "12345678".to_string());
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_single_entry() {
        let interner = IdentifierInterner::new();
        let a = interner.normalize(account_type(), "12345678".to_string());
        let b = interner.normalize(account_type(), "87654321".to_string());

        let removed = interner.remove(&a).unwrap();
        assert!(Arc::ptr_eq(&removed, &a));
        assert_eq!(interner.len(), 1);
        assert!(interner.remove(&a).is_none());

        let again = interner.normalize(account_type(), "87654321".to_string());
        assert!(Arc::ptr_eq(&again, &b));
        let fresh = interner.normalize(account_type(), "12345678".to_string());
        assert!(!Arc::ptr_eq(&fresh, &a));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_concurrent_normalize() {
        let interner: Arc<IdentifierInterner<String, String>> = Arc::new(IdentifierInterner::new());
        let metadata = account_type();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let interner = Arc::clone(&interner);
                let metadata = Arc::clone(&metadata);
                std::thread::spawn(move || interner.normalize(metadata, "12345678".to_string()))
            })
            .collect();
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.iter().all(|id| Arc::ptr_eq(id, &ids[0])));
        assert_eq!(interner.len(), 1);
    }
}

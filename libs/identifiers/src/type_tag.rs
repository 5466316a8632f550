//! Whole-value type tags.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

use iri_string::types::UriReferenceString;

/// A type usable as the whole value of an identifier.
///
/// The label is what a [`TypeTag`] displays, e.g. `AccountID (text)`.
pub trait WholeValue: 'static {
    /// Display label of this whole-value type.
    const TYPE_LABEL: &'static str;
}

impl WholeValue for String {
    const TYPE_LABEL: &'static str = "text";
}

impl WholeValue for i32 {
    const TYPE_LABEL: &'static str = "integer";
}

impl WholeValue for i64 {
    const TYPE_LABEL: &'static str = "integer";
}

impl WholeValue for u32 {
    const TYPE_LABEL: &'static str = "integer";
}

impl WholeValue for u64 {
    const TYPE_LABEL: &'static str = "integer";
}

impl WholeValue for uuid::Uuid {
    const TYPE_LABEL: &'static str = "uuid";
}

impl WholeValue for ulid::Ulid {
    const TYPE_LABEL: &'static str = "ulid";
}

impl WholeValue for UriReferenceString {
    const TYPE_LABEL: &'static str = "uri";
}

/// Identifies the kind of raw value an identifier holds.
///
/// Two tags are equal when they describe the same Rust type. The label
/// always comes from [`WholeValue::TYPE_LABEL`], so equal tags display
/// the same.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    label: &'static str,
}

impl TypeTag {
    /// The tag of a [`WholeValue`] type, carrying its default label.
    #[must_use]
    pub fn of<W: WholeValue>() -> Self {
        Self {
            id: TypeId::of::<W>(),
            label: W::TYPE_LABEL,
        }
    }

    /// The tag for text identifiers.
    #[must_use]
    pub fn text() -> Self {
        Self::of::<String>()
    }

    /// Returns true if this tag describes `W`.
    #[must_use]
    pub fn describes<W: 'static>(&self) -> bool {
        self.id == TypeId::of::<W>()
    }

    /// The display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

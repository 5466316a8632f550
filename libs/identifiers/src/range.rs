//! Substring extraction by half-open character range.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{Extractor, IdentifierError};

/// Extracts the characters in `[start, end)` of a text whole.
///
/// Offsets count `char`s, not bytes. Bounds are clamped on construction:
/// `start` is floored at zero and `end` is floored at `start`.
///
/// If the text is too short to contain the start offset (`len <= start`)
/// the extraction is absent rather than empty. An `end` past the text is
/// clamped to the text's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeBounds")]
pub struct RangeExtractor {
    start: usize,
    end: usize,
}

/// Raw, unclamped bounds as they appear in serialized form.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeBounds {
    start: i64,
    end: i64,
}

impl From<RangeBounds> for RangeExtractor {
    fn from(bounds: RangeBounds) -> Self {
        Self::from_signed(bounds.start, bounds.end)
    }
}

impl RangeExtractor {
    /// Creates a new extractor over `[start, end)`, clamping both bounds.
    #[must_use]
    pub fn new(start: isize, end: isize) -> Self {
        Self::from_signed(start as i64, end as i64)
    }

    fn from_signed(start: i64, end: i64) -> Self {
        let start = usize::try_from(start).unwrap_or(0);
        let end = usize::try_from(end).unwrap_or(0).max(start);
        Self { start, end }
    }

    /// Inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Extracts the configured range from `text`.
    ///
    /// Returns `None` when `text` has no character at `start`.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        let begin = text.char_indices().nth(self.start).map(|(i, _)| i)?;
        let rest = &text[begin..];
        let finish = rest
            .char_indices()
            .nth(self.end - self.start)
            .map_or(text.len(), |(i, _)| begin + i);
        Some(text[begin..finish].to_string())
    }
}

impl From<Range<usize>> for RangeExtractor {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }
}

impl std::fmt::Display for RangeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Extractor<String, String> for RangeExtractor {
    fn extract_from(&self, whole: Option<&String>) -> Result<Option<String>, IdentifierError> {
        Ok(whole.and_then(|text| self.extract(text)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_leading_segment() {
        let extractor = RangeExtractor::new(0, 4);
        assert_eq!(extractor.extract("12345678"), Some("1234".to_string()));
    }

    #[test]
    fn test_start_at_length_is_absent() {
        assert_eq!(RangeExtractor::new(2, 2).extract("ab"), None);
        assert_eq!(RangeExtractor::new(2, 5).extract("ab"), None);
        assert_eq!(RangeExtractor::new(0, 3).extract(""), None);
    }

    #[test]
    fn test_empty_range_inside_text_is_empty() {
        assert_eq!(RangeExtractor::new(1, 1).extract("ab"), Some(String::new()));
    }

    #[test]
    fn test_end_clamped_to_length() {
        assert_eq!(
            RangeExtractor::new(4, 100).extract("aaaabbbb"),
            Some("bbbb".to_string())
        );
    }

    #[test]
    fn test_bounds_clamped() {
        let extractor = RangeExtractor::new(-3, 2);
        assert_eq!((extractor.start(), extractor.end()), (0, 2));

        let extractor = RangeExtractor::new(5, 1);
        assert_eq!((extractor.start(), extractor.end()), (5, 5));

        let extractor = RangeExtractor::new(-4, -1);
        assert_eq!((extractor.start(), extractor.end()), (0, 0));

        assert_eq!(RangeExtractor::from(3..1), RangeExtractor::new(3, 3));
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let extractor = RangeExtractor::new(1, 3);
        assert_eq!(extractor.extract("żółw"), Some("ół".to_string()));
    }

    #[test]
    fn test_absent_whole_is_absent() {
        let extractor = RangeExtractor::new(0, 4);
        assert_eq!(extractor.extract_from(None), Ok(None));
    }

    #[test]
    fn test_equality_from_bounds_only() {
        let set: HashSet<_> = [
            RangeExtractor::new(0, 4),
            RangeExtractor::from(0..4),
            RangeExtractor::new(-1, 4),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
        assert_ne!(RangeExtractor::new(0, 4), RangeExtractor::new(0, 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(RangeExtractor::new(2, 6).to_string(), "2..6");
    }

    #[test]
    fn test_json_deserialize_clamps() {
        let extractor: RangeExtractor =
            serde_json::from_str(r#"{"start": -2, "end": -5}"#).unwrap();
        assert_eq!(extractor, RangeExtractor::new(0, 0));

        let json = serde_json::to_string(&RangeExtractor::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"start":1,"end":3}"#);
    }

    #[test]
    fn test_json_rejects_unknown_bound() {
        let result = serde_json::from_str::<RangeExtractor>(r#"{"start": 0, "end": 4, "sart": 9}"#);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_extract_matches_char_slice(
            text in "\\PC{0,24}",
            start in 0usize..30,
            width in 0usize..30,
        ) {
            let end = start + width;
            let extractor = RangeExtractor::from(start..end);
            let chars: Vec<char> = text.chars().collect();
            let expected = if chars.len() <= start {
                None
            } else {
                Some(chars[start..end.min(chars.len())].iter().collect::<String>())
            };
            prop_assert_eq!(extractor.extract(&text), expected);
        }

        #[test]
        fn prop_clamped_bounds_ordered(start in any::<isize>(), end in any::<isize>()) {
            let extractor = RangeExtractor::new(start, end);
            prop_assert!(extractor.start() <= extractor.end());
        }

        #[test]
        fn prop_equality_transitive_and_hash_consistent(start in -8isize..24, end in -8isize..24) {
            let a = RangeExtractor::new(start, end);
            let b = RangeExtractor::from(a.start()..a.end());
            let c: RangeExtractor = serde_json::from_value(
                serde_json::json!({ "start": start, "end": end }),
            )
            .unwrap();
            prop_assert!(a == b && b == c);
            prop_assert_eq!(a, c);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
            prop_assert_eq!(hash_of(&b), hash_of(&c));
        }
    }
}

//! Macros for declaring extractor maps.

/// Builds an [`ExtractorMap`](crate::ExtractorMap) from `key => extractor`
/// pairs.
///
/// Each extractor is erased into a shared extractor; keys go through
/// `Into`, so string literals work for `String` keys.
///
/// # Example
///
/// ```ignore
/// let extractors: ExtractorMap<String, String> = extractors! {
///     "fund" => RangeExtractor::new(0, 4),
///     "branch" => RangeExtractor::new(4, 8),
/// };
/// let account_id = TextTypeMetadata::with_extractors("AccountID", &extractors)?;
/// ```
#[macro_export]
macro_rules! extractors {
    () => {
        ::std::collections::HashMap::new()
    };
    ($($key:expr => $extractor:expr),+ $(,)?) => {{
        let mut map = ::std::collections::HashMap::new();
        $(
            map.insert(::std::convert::Into::into($key), $crate::share($extractor));
        )+
        map
    }};
}

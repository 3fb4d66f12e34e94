pub mod links;
pub mod sender_info;
pub mod urgent_language;

pub use links::extract_urls;
pub use sender_info::check_sender_info;
pub use urgent_language::check_urgent_language;

/// Return every phrase from `phrases` contained in `haystack`, keeping list order.
///
/// Plain substring containment: no word boundaries, no normalization beyond
/// what the caller already applied to `haystack`.
pub(crate) fn matching_phrases(haystack: &str, phrases: &[&'static str]) -> Vec<&'static str> {
    phrases
        .iter()
        .copied()
        .filter(|phrase| haystack.contains(phrase))
        .collect()
}
